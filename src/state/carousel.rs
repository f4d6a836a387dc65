/// Cyclic cursor over an image gallery
///
/// The carousel only tracks a position; the images themselves stay with
/// the owning work item and are passed in when the current one is needed.
use thiserror::Error;

use super::data::ImageRef;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("image index {index} is out of range for a gallery of {len}")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    len: usize,
}

impl CarouselState {
    /// Create a carousel over `len` images, starting at the first one.
    ///
    /// An empty gallery is treated as a single immutable image.
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    /// Create a carousel starting at `index` (wrapped into range)
    pub fn starting_at(len: usize, index: usize) -> Self {
        let mut state = Self::new(len);
        state.index = index % state.len;
        state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn has_multiple(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Jump to `index`. Out of range requests leave the position unchanged.
    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(())
    }

    /// The image at the current position, if the gallery has one there
    pub fn current<'a>(&self, images: &'a [ImageRef]) -> Option<&'a ImageRef> {
        images.get(self.index).or_else(|| images.first())
    }
}
