use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::assets::{self, AssetError, LoadedImage, Tier};
use crate::state::data::ImageRef;

#[derive(Debug, Clone)]
enum Slot {
    Loading,
    Ready(Handle),
    Failed,
}

pub fn to_handle(image: LoadedImage) -> Handle {
    Handle::from_rgba(image.width, image.height, image.pixels)
}

/// Decoded image handles by (reference, tier).
///
/// Lookups never fail: anything not ready yet shows a smaller tier if one is
/// loaded, and anything broken shows the placeholder.
#[derive(Debug)]
pub struct ImageCache {
    slots: HashMap<(ImageRef, Tier), Slot>,
    placeholder: Handle,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            placeholder: to_handle(assets::placeholder()),
        }
    }

    /// Mark an image as loading. Returns true if the caller should start the load.
    pub fn begin(&mut self, image: &ImageRef, tier: Tier) -> bool {
        let key = (image.clone(), tier);
        if self.slots.contains_key(&key) {
            return false;
        }
        self.slots.insert(key, Slot::Loading);
        true
    }

    pub fn finish(&mut self, image: ImageRef, tier: Tier, result: Result<Handle, AssetError>) {
        let slot = match result {
            Ok(handle) => Slot::Ready(handle),
            Err(e) => {
                tracing::warn!("⚠️  Using placeholder for '{image}' ({tier:?}): {e}");
                Slot::Failed
            }
        };
        self.slots.insert((image, tier), slot);
    }

    pub fn handle(&self, image: &ImageRef, tier: Tier) -> Handle {
        let mut tier = Some(tier);
        while let Some(current) = tier {
            if let Some(Slot::Ready(handle)) = self.slots.get(&(image.clone(), current)) {
                return handle.clone();
            }
            tier = current.smaller();
        }
        self.placeholder.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> Handle {
        Handle::from_rgba(width, height, vec![255u8; (width * height * 4) as usize])
    }

    #[test]
    fn test_begin_only_once() {
        let mut cache = ImageCache::new();
        let image = ImageRef::new("/a.png");
        assert!(cache.begin(&image, Tier::Card));
        assert!(!cache.begin(&image, Tier::Card));
        assert!(cache.begin(&image, Tier::Detail));
    }

    #[test]
    fn test_failed_and_loading_use_placeholder() {
        let mut cache = ImageCache::new();
        let image = ImageRef::new("/a.png");
        let placeholder = cache.handle(&image, Tier::Card).id();

        cache.begin(&image, Tier::Card);
        assert_eq!(cache.handle(&image, Tier::Card).id(), placeholder);

        cache.finish(image.clone(), Tier::Card, Err(AssetError::Missing));
        assert_eq!(cache.handle(&image, Tier::Card).id(), placeholder);
    }

    #[test]
    fn test_falls_back_to_smaller_tier() {
        let mut cache = ImageCache::new();
        let image = ImageRef::new("/a.png");
        let card = solid(2, 2);
        cache.finish(image.clone(), Tier::Card, Ok(card.clone()));

        assert_eq!(cache.handle(&image, Tier::Full).id(), card.id());

        let full = solid(4, 4);
        cache.finish(image.clone(), Tier::Full, Ok(full.clone()));
        assert_eq!(cache.handle(&image, Tier::Full).id(), full.id());
    }
}
