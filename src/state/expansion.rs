/// Detail and zoom overlay state machine
///
/// ```text
/// Closed --expand--> Expanded --zoom--> Zoomed
/// Closed <--close--- Expanded <-unzoom- Zoomed
/// ```
///
/// The zoom overlay mirrors the detail carousel, so `zoomed_image` and the
/// detail index move together. While zoomed with more than one image, the
/// controller holds an auto-advance lease; the UI subscribes to a timer only
/// while that lease exists, so dropping it is what cancels the timer.
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::carousel::{CarouselError, CarouselState};
use super::data::{ImageRef, WorkItem};

/// Default auto-advance period for the zoom overlay
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Closed,
    Expanded,
    Zoomed,
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Presentation::Closed => "closed",
            Presentation::Expanded => "expanded",
            Presentation::Zoomed => "zoomed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Expand,
    Zoom,
    Unzoom,
    Close,
    Navigate,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Expand => "expand",
            Action::Zoom => "zoom",
            Action::Unzoom => "unzoom",
            Action::Close => "close",
            Action::Navigate => "navigate",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("cannot {action} while {from}")]
    InvalidTransition { from: Presentation, action: Action },

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}

/// Where a click landed inside the overlay stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    DetailBackdrop,
    DetailContent,
    DetailImage,
    ZoomBackdrop,
    ZoomContent,
}

/// Identity of one armed auto-advance timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Lease on the auto-advance timer. Exists only while the zoom overlay is open.
#[derive(Debug, PartialEq, Eq)]
pub struct AutoAdvance {
    id: TimerId,
    interval: Duration,
}

impl AutoAdvance {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Shared counter of open overlays that block page scrolling
#[derive(Debug, Clone, Default)]
pub struct ScrollLatch {
    holders: Arc<AtomicUsize>,
}

impl ScrollLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLock {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollLock {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

/// Held while an overlay is open; releases the lock on drop
#[derive(Debug)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
struct Zoom {
    image: ImageRef,
    timer: Option<AutoAdvance>,
}

#[derive(Debug)]
struct Expansion {
    item: Arc<WorkItem>,
    carousel: CarouselState,
    zoom: Option<Zoom>,
    _scroll: ScrollLock,
}

#[derive(Debug)]
pub struct ExpansionController {
    open: Option<Expansion>,
    latch: ScrollLatch,
    interval: Duration,
    next_timer: u64,
}

impl ExpansionController {
    pub fn new(latch: ScrollLatch, interval: Duration) -> Self {
        Self {
            open: None,
            latch,
            interval,
            next_timer: 0,
        }
    }

    pub fn presentation(&self) -> Presentation {
        match &self.open {
            None => Presentation::Closed,
            Some(Expansion { zoom: None, .. }) => Presentation::Expanded,
            Some(Expansion { zoom: Some(_), .. }) => Presentation::Zoomed,
        }
    }

    pub fn expanded_item(&self) -> Option<&Arc<WorkItem>> {
        self.open.as_ref().map(|open| &open.item)
    }

    pub fn zoomed_image(&self) -> Option<&ImageRef> {
        self.open
            .as_ref()
            .and_then(|open| open.zoom.as_ref())
            .map(|zoom| &zoom.image)
    }

    pub fn carousel(&self) -> Option<&CarouselState> {
        self.open.as_ref().map(|open| &open.carousel)
    }

    /// Image currently shown in the detail overlay
    pub fn detail_image(&self) -> Option<&ImageRef> {
        self.open
            .as_ref()
            .and_then(|open| open.carousel.current(&open.item.images))
    }

    /// The live auto-advance lease, if the zoom overlay is cycling
    pub fn timer(&self) -> Option<&AutoAdvance> {
        self.open
            .as_ref()
            .and_then(|open| open.zoom.as_ref())
            .and_then(|zoom| zoom.timer.as_ref())
    }

    fn invalid(&self, action: Action) -> ExpansionError {
        ExpansionError::InvalidTransition {
            from: self.presentation(),
            action,
        }
    }

    /// Closed -> Expanded, seeding the detail carousel from the card's position
    pub fn expand(&mut self, item: Arc<WorkItem>, from_index: usize) -> Result<(), ExpansionError> {
        if self.open.is_some() {
            return Err(self.invalid(Action::Expand));
        }

        let carousel = CarouselState::starting_at(item.image_count(), from_index);
        tracing::debug!(item = %item.id, index = carousel.index(), "expanding work item");
        self.open = Some(Expansion {
            item,
            carousel,
            zoom: None,
            _scroll: self.latch.acquire(),
        });
        Ok(())
    }

    /// Expanded -> Zoomed on the detail carousel's current image
    pub fn zoom(&mut self) -> Result<(), ExpansionError> {
        let cycles = match &self.open {
            Some(open) if open.zoom.is_none() => open.carousel.has_multiple(),
            _ => return Err(self.invalid(Action::Zoom)),
        };
        let timer = cycles.then(|| self.arm_timer());

        if let Some(open) = self.open.as_mut() {
            let image = open
                .carousel
                .current(&open.item.images)
                .cloned()
                .unwrap_or_else(ImageRef::missing);
            tracing::debug!(item = %open.item.id, image = %image, "zooming image");
            open.zoom = Some(Zoom { image, timer });
        }
        Ok(())
    }

    /// Zoomed -> Expanded. Drops the auto-advance lease.
    pub fn unzoom(&mut self) -> Result<(), ExpansionError> {
        match self.open.as_mut() {
            Some(open) if open.zoom.is_some() => {
                open.zoom = None;
                tracing::debug!(item = %open.item.id, "closed zoom overlay");
                Ok(())
            }
            _ => Err(self.invalid(Action::Unzoom)),
        }
    }

    /// Expanded -> Closed. Releases the scroll lock.
    pub fn close(&mut self) -> Result<(), ExpansionError> {
        match self.presentation() {
            Presentation::Expanded => {
                if let Some(open) = self.open.take() {
                    tracing::debug!(item = %open.item.id, "closed detail overlay");
                }
                Ok(())
            }
            _ => Err(self.invalid(Action::Close)),
        }
    }

    /// Escape key: peel off the topmost overlay
    pub fn dismiss(&mut self) -> Result<(), ExpansionError> {
        match self.presentation() {
            Presentation::Zoomed => self.unzoom(),
            _ => self.close(),
        }
    }

    pub fn click(&mut self, target: ClickTarget) -> Result<(), ExpansionError> {
        match target {
            ClickTarget::DetailBackdrop => self.close(),
            ClickTarget::ZoomBackdrop => self.unzoom(),
            ClickTarget::DetailImage => self.zoom(),
            ClickTarget::DetailContent | ClickTarget::ZoomContent => Ok(()),
        }
    }

    pub fn next(&mut self) -> Result<(), ExpansionError> {
        self.navigate(|carousel| {
            carousel.next();
            Ok(())
        })
    }

    pub fn prev(&mut self) -> Result<(), ExpansionError> {
        self.navigate(|carousel| {
            carousel.prev();
            Ok(())
        })
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), ExpansionError> {
        self.navigate(|carousel| carousel.go_to(index))
    }

    /// Auto-advance firing. Ticks from a lease that is no longer live are
    /// ignored; returns whether the carousel moved.
    pub fn tick(&mut self, id: TimerId) -> bool {
        if self.timer().map(AutoAdvance::id) != Some(id) {
            tracing::trace!(?id, "ignoring stale auto-advance tick");
            return false;
        }

        if let Some(open) = self.open.as_mut() {
            open.carousel.next();
            sync_zoom(open);
        }
        true
    }

    /// Manual navigation. Restarts the auto-advance countdown when zoomed.
    fn navigate(
        &mut self,
        step: impl FnOnce(&mut CarouselState) -> Result<(), CarouselError>,
    ) -> Result<(), ExpansionError> {
        let rearm = match self.open.as_ref() {
            Some(open) => open.zoom.as_ref().is_some_and(|zoom| zoom.timer.is_some()),
            None => return Err(self.invalid(Action::Navigate)),
        };
        let timer = rearm.then(|| self.arm_timer());

        let Some(open) = self.open.as_mut() else {
            return Err(self.invalid(Action::Navigate));
        };
        step(&mut open.carousel)?;
        sync_zoom(open);
        if let (Some(zoom), Some(timer)) = (open.zoom.as_mut(), timer) {
            zoom.timer = Some(timer);
        }
        Ok(())
    }

    fn arm_timer(&mut self) -> AutoAdvance {
        self.next_timer += 1;
        AutoAdvance {
            id: TimerId(self.next_timer),
            interval: self.interval,
        }
    }
}

/// Keep the zoomed image on the detail carousel's position
fn sync_zoom(open: &mut Expansion) {
    if let Some(zoom) = open.zoom.as_mut() {
        if let Some(image) = open.carousel.current(&open.item.images) {
            zoom.image = image.clone();
        }
    }
}
