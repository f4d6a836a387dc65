use thiserror::Error;

use crate::config::ConfigError;
use crate::state::catalog::CatalogError;

/// Errors that can stop the application before the window opens
#[derive(Error, Debug)]
pub enum FolioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("window error: {0}")]
    Window(#[from] iced::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
