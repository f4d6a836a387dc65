/// Image asset resolution module
///
/// This module handles:
/// - Mapping catalog image references to files under the assets directory
/// - Decoding and resizing images into display tiers
/// - Caching resized tiers to disk
/// - A generated placeholder for anything that fails to load

pub mod loader;
pub mod tiers;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::data::ImageRef;

pub use loader::load;
pub use tiers::{placeholder, Tier};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("image reference is empty")]
    Missing,

    #[error("image not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("background task failed: {0}")]
    Task(String),
}

/// Decoded RGBA pixels ready for display
#[derive(Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Resolves image references against the assets directory
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
    cache_root: Option<PathBuf>,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>, cache_root: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache_root,
        }
    }

    /// Resolver using the system cache directory for resized tiers
    pub fn with_system_cache(root: impl Into<PathBuf>) -> Self {
        Self::new(root, tiers::default_cache_root())
    }

    pub fn cache_root(&self) -> Option<&Path> {
        self.cache_root.as_deref()
    }

    /// "/images/a.png" -> "<root>/images/a.png"
    pub fn resolve(&self, image: &ImageRef) -> Result<PathBuf, AssetError> {
        if image.is_missing() {
            return Err(AssetError::Missing);
        }

        let relative = image.as_str().trim_start_matches('/');
        Ok(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_leading_slash() {
        let resolver = AssetResolver::new("/srv/public", None);
        let path = resolver.resolve(&ImageRef::new("/images/a.png")).unwrap();
        assert_eq!(path, PathBuf::from("/srv/public/images/a.png"));
    }

    #[test]
    fn test_resolve_missing() {
        let resolver = AssetResolver::new("/srv/public", None);
        assert_eq!(resolver.resolve(&ImageRef::missing()), Err(AssetError::Missing));
    }
}
