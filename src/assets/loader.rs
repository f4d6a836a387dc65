/// Background image loading
///
/// Decoding and resizing are CPU-heavy, so they run on tokio's blocking pool
/// and the UI receives the result as a message.
use std::path::PathBuf;
use tokio::task;

use super::tiers::{self, Tier};
use super::{AssetError, LoadedImage};

/// Load `source` at `tier` without blocking the UI thread
pub async fn load(
    source: PathBuf,
    cache_root: Option<PathBuf>,
    tier: Tier,
) -> Result<LoadedImage, AssetError> {
    task::spawn_blocking(move || tiers::load_tier(&source, cache_root.as_deref(), tier))
        .await
        .map_err(|e| AssetError::Task(e.to_string()))?
}
