use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::data::{FilterTag, ImageRef, ItemId, Stat, WorkItem};

/// Catalog shipped inside the binary
const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate work item id {0}")]
    DuplicateId(ItemId),
}

/// Work item as it appears in catalog JSON, before normalization
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWorkItem {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    additional_details: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    /// Legacy single-image field
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    stats: RawStats,
    #[serde(default)]
    avatar: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    filter: Option<String>,
}

/// Stats come either as a keyed map or as a list of entries
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStats {
    List(Vec<RawStat>),
    Map(serde_json::Map<String, serde_json::Value>),
}

impl Default for RawStats {
    fn default() -> Self {
        RawStats::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct RawStat {
    label: String,
    value: serde_json::Value,
}

/// Renders a JSON scalar verbatim (strings without quotes)
fn display_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

impl RawStats {
    fn normalize(self) -> Vec<Stat> {
        match self {
            RawStats::List(entries) => entries
                .into_iter()
                .map(|entry| Stat {
                    label: entry.label,
                    value: display_value(entry.value),
                })
                .collect(),
            RawStats::Map(map) => map
                .into_iter()
                .map(|(label, value)| Stat {
                    label,
                    value: display_value(value),
                })
                .collect(),
        }
    }
}

impl RawWorkItem {
    fn normalize(self) -> WorkItem {
        let mut images: Vec<ImageRef> = self
            .images
            .into_iter()
            .filter(|path| !path.trim().is_empty())
            .map(ImageRef::new)
            .collect();

        if images.is_empty() {
            match self.image.filter(|path| !path.trim().is_empty()) {
                Some(single) => images.push(ImageRef::new(single)),
                None => {
                    tracing::warn!(id = self.id, "work item has no images, using placeholder");
                    images.push(ImageRef::missing());
                }
            }
        }

        let filter_tag = match self.filter {
            Some(tag) => FilterTag::new(tag),
            None => FilterTag::from_avatar(&self.avatar),
        };

        WorkItem {
            id: ItemId(self.id),
            title: self.title,
            description: self.description,
            additional_details: self.additional_details,
            images,
            stats: self.stats.normalize(),
            avatar: ImageRef::new(self.avatar),
            name: self.name,
            location: self.location,
            filter_tag,
        }
    }
}

/// Read-only list of work items, built once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Arc<WorkItem>>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and normalize catalog JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawWorkItem> = serde_json::from_str(json)?;
        Self::from_items(raw.into_iter().map(RawWorkItem::normalize).collect())
    }

    pub fn from_items(items: Vec<WorkItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }

        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn items(&self) -> &[Arc<WorkItem>] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Arc<WorkItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 7);
        assert!(catalog.items().iter().all(|item| !item.images.is_empty()));
    }

    #[test]
    fn test_map_stats_keep_order() {
        let catalog = Catalog::embedded().unwrap();
        let dragon = catalog.get(ItemId(1)).unwrap();
        let labels: Vec<&str> = dragon.stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["distance", "elevation", "time"]);
        assert_eq!(dragon.stats[0].value, "563km");
    }

    #[test]
    fn test_list_stats_and_numbers() {
        let json = r#"[{
            "id": 1, "title": "t", "images": ["/a.png"],
            "stats": [{"label": "count", "value": 27}, {"label": "rate", "value": "85%"}]
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let stats = &catalog.items()[0].stats;
        assert_eq!(stats[0], Stat { label: "count".into(), value: "27".into() });
        assert_eq!(stats[1].value, "85%");
    }

    #[test]
    fn test_legacy_single_image() {
        let json = r#"[{"id": 1, "title": "t", "image": "/only.png"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.items()[0].images, vec![ImageRef::new("/only.png")]);
    }

    #[test]
    fn test_no_images_becomes_placeholder() {
        let json = r#"[{"id": 1, "title": "t", "images": []}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let images = &catalog.items()[0].images;
        assert_eq!(images.len(), 1);
        assert!(images[0].is_missing());
    }

    #[test]
    fn test_filter_derived_from_avatar_when_absent() {
        let json = r#"[
            {"id": 1, "title": "a", "images": ["/a.png"], "avatar": "/images/professional_headshot.jpeg"},
            {"id": 2, "title": "b", "images": ["/b.png"], "avatar": "/images/biking_headshot.JPG"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.items()[0].filter_tag, FilterTag::professional());
        assert_eq!(catalog.items()[1].filter_tag, FilterTag::adventures());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 3, "title": "a", "images": ["/a.png"]},
            {"id": 3, "title": "b", "images": ["/b.png"]}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ItemId(3))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
