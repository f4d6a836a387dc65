use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

use super::{AssetError, LoadedImage};

/// Display size tiers. Each tier is cached separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Inline card previews
    Card,
    /// Detail overlay
    Detail,
    /// Full-screen zoom overlay
    Full,
}

impl Tier {
    /// Longest edge in pixels
    pub fn max_edge(self) -> u32 {
        match self {
            Tier::Card => 480,
            Tier::Detail => 1280,
            Tier::Full => 2560,
        }
    }

    /// Next smaller tier, shown while this one is still loading
    pub fn smaller(self) -> Option<Tier> {
        match self {
            Tier::Card => None,
            Tier::Detail => Some(Tier::Card),
            Tier::Full => Some(Tier::Detail),
        }
    }

    fn dir_name(self) -> &'static str {
        match self {
            Tier::Card => "card",
            Tier::Detail => "detail",
            Tier::Full => "full",
        }
    }
}

/// Get the tier cache root
/// Returns ~/.cache/folio on Linux
pub fn default_cache_root() -> Option<PathBuf> {
    let mut path = dirs_next::cache_dir().or_else(dirs_next::home_dir)?;
    path.push("folio");
    Some(path)
}

/// Cache file for a source image at a given tier
pub fn cache_path(cache_root: &Path, source: &Path, tier: Tier) -> PathBuf {
    let name: String = source
        .to_string_lossy()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    cache_root.join(tier.dir_name()).join(format!("{name}.jpg"))
}

/// Load `source` resized to `tier`, reusing or refreshing the disk cache
pub fn load_tier(source: &Path, cache_root: Option<&Path>, tier: Tier) -> Result<LoadedImage, AssetError> {
    if !source.is_file() {
        return Err(AssetError::NotFound(source.to_path_buf()));
    }

    let cached = cache_root.map(|root| cache_path(root, source, tier));

    if let Some(cached) = cached.as_deref() {
        if is_fresh(cached, source) {
            match image::open(cached) {
                Ok(img) => return Ok(to_loaded(img)),
                Err(e) => tracing::debug!("Ignoring unreadable cache {}: {e}", cached.display()),
            }
        }
    }

    let img = image::open(source).map_err(|e| AssetError::Decode {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    let edge = tier.max_edge();
    let img = if img.width() > edge || img.height() > edge {
        img.resize(edge, edge, FilterType::Lanczos3)
    } else {
        img
    };

    if let Some(cached) = cached.as_deref() {
        save_cache(&img, cached);
    }

    Ok(to_loaded(img))
}

/// Cached file exists and is at least as new as its source
fn is_fresh(cached: &Path, source: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
    match (modified(cached), modified(source)) {
        (Some(cached), Some(source)) => cached >= source,
        _ => false,
    }
}

/// A failed cache write only costs a re-decode next time
fn save_cache(img: &DynamicImage, cached: &Path) {
    if let Some(parent) = cached.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::warn!("Failed to create cache directory {}: {e}", parent.display());
            return;
        }
    }

    // JPEG has no alpha channel
    match DynamicImage::ImageRgb8(img.to_rgb8()).save(cached) {
        Ok(()) => tracing::debug!("📸 Cached tier: {}", cached.display()),
        Err(e) => tracing::warn!("Failed to cache {}: {e}", cached.display()),
    }
}

fn to_loaded(img: DynamicImage) -> LoadedImage {
    let rgba = img.to_rgba8();
    LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    }
}

/// Soft diagonal gradient shown in place of any image that failed to load
pub fn placeholder() -> LoadedImage {
    const WIDTH: u32 = 160;
    const HEIGHT: u32 = 120;

    let img = RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
        let t = (x + y) as f32 / (WIDTH + HEIGHT) as f32;
        let r = 255.0;
        let g = 240.0 - 60.0 * t;
        let b = 133.0 - 110.0 * t;
        Rgba([r as u8, g as u8, b as u8, 255])
    });

    LoadedImage {
        width: WIDTH,
        height: HEIGHT,
        pixels: img.into_raw(),
    }
}
