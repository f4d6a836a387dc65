/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog layer and the UI layer.

use std::fmt;

/// Path used by the professional headshot avatar.
///
/// Only consulted when a catalog entry carries no explicit filter tag.
pub const PROFESSIONAL_AVATAR: &str = "/images/professional_headshot.jpeg";

/// Unique identifier of a work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a static image asset (e.g., "/images/map.png")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Reference that never resolves; renders as the placeholder.
    pub fn missing() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_missing(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key used to select a subset of work items
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterTag(String);

impl FilterTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn professional() -> Self {
        Self::new("professional")
    }

    pub fn adventures() -> Self {
        Self::new("adventures")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag implied by an avatar path, for entries that predate explicit tags
    pub fn from_avatar(avatar: &str) -> Self {
        if avatar == PROFESSIONAL_AVATAR {
            Self::professional()
        } else {
            Self::adventures()
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One (label, value) statistic shown on a card, rendered verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

/// Represents a single portfolio entry
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub id: ItemId,
    pub title: String,
    /// Short summary shown on the card
    pub description: String,
    /// Long-form paragraphs shown in the detail overlay
    pub additional_details: Vec<String>,
    /// Never empty; normalized when the catalog is built
    pub images: Vec<ImageRef>,
    pub stats: Vec<Stat>,
    pub avatar: ImageRef,
    pub name: String,
    pub location: String,
    pub filter_tag: FilterTag,
}

impl WorkItem {
    /// Number of images in this item's gallery (at least 1)
    pub fn image_count(&self) -> usize {
        self.images.len().max(1)
    }
}
