use std::sync::Arc;

use super::catalog::Catalog;
use super::data::{FilterTag, WorkItem};

/// Holds the active filter and derives the visible subset of the catalog.
///
/// Unknown tags are not an error: they simply match nothing.
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    active: Option<FilterTag>,
}

impl FilterController {
    pub fn new(active: Option<FilterTag>) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Option<&FilterTag> {
        self.active.as_ref()
    }

    /// Set the active filter. Returns true if the filter actually changed.
    pub fn set_filter(&mut self, filter: Option<FilterTag>) -> bool {
        if self.active == filter {
            return false;
        }
        tracing::debug!(filter = ?filter, "filter changed");
        self.active = filter;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.set_filter(None)
    }

    pub fn matches(&self, item: &WorkItem) -> bool {
        self.active
            .as_ref()
            .map_or(true, |tag| item.filter_tag == *tag)
    }

    /// Items to render, in catalog order
    pub fn visible<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Arc<WorkItem>> + 'a {
        catalog.items().iter().filter(move |item| self.matches(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ItemId;

    fn ids(filter: &FilterController, catalog: &Catalog) -> Vec<ItemId> {
        filter.visible(catalog).map(|item| item.id).collect()
    }

    #[test]
    fn test_no_filter_shows_everything() {
        let catalog = Catalog::embedded().unwrap();
        let filter = FilterController::default();
        assert_eq!(ids(&filter, &catalog).len(), 7);
    }

    #[test]
    fn test_professional_subset() {
        let catalog = Catalog::embedded().unwrap();
        let mut filter = FilterController::default();
        filter.set_filter(Some(FilterTag::professional()));

        let expected: Vec<ItemId> = catalog
            .items()
            .iter()
            .filter(|item| item.avatar.as_str() == crate::state::data::PROFESSIONAL_AVATAR)
            .map(|item| item.id)
            .collect();
        assert_eq!(ids(&filter, &catalog), expected);
        assert_eq!(expected.len(), 5);
    }

    #[test]
    fn test_adventures_subset() {
        let catalog = Catalog::embedded().unwrap();
        let filter = FilterController::new(Some(FilterTag::adventures()));
        assert_eq!(ids(&filter, &catalog), vec![ItemId(1), ItemId(4)]);
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let catalog = Catalog::embedded().unwrap();
        let filter = FilterController::new(Some(FilterTag::new("gardening")));
        assert!(ids(&filter, &catalog).is_empty());
    }

    #[test]
    fn test_clear_restores_all() {
        let catalog = Catalog::embedded().unwrap();
        let mut filter = FilterController::new(Some(FilterTag::adventures()));
        assert!(filter.clear());
        assert_eq!(ids(&filter, &catalog).len(), 7);
    }

    #[test]
    fn test_set_filter_is_idempotent() {
        let mut filter = FilterController::default();
        assert!(filter.set_filter(Some(FilterTag::adventures())));
        assert!(!filter.set_filter(Some(FilterTag::adventures())));
        assert_eq!(filter.active(), Some(&FilterTag::adventures()));
    }
}
