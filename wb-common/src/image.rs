//! Image records and the ordered collections the gallery navigates

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;
use url::Url;

/// Source of collection identities. Every new collection gets a fresh one.
static COLLECTION_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    COLLECTION_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// One displayable image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Informative only, not required to be unique
    #[serde(default)]
    pub id: Option<u32>,
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
    /// Space tag used for page-level filtering
    #[serde(default)]
    pub space: Option<String>,
}

/// Which images a page shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpaceFilter {
    #[default]
    All,
    Space(String),
}

impl SpaceFilter {
    pub fn matches(&self, item: &ImageItem) -> bool {
        match self {
            SpaceFilter::All => true,
            SpaceFilter::Space(tag) => item.space.as_deref() == Some(tag.as_str()),
        }
    }
}

/// Ordered, immutable image sequence with an identity stamp.
///
/// Equal contents with different generations are still different
/// collections; lightbox indices from one are meaningless in the other.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCollection {
    items: Vec<ImageItem>,
    generation: u64,
}

impl Default for ImageCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ImageCollection {
    pub fn new(items: Vec<ImageItem>) -> Self {
        Self {
            items,
            generation: next_generation(),
        }
    }

    /// New collection holding only the items the filter accepts.
    pub fn filter_by_space(&self, filter: &SpaceFilter) -> Self {
        Self::new(
            self.items
                .iter()
                .filter(|item| filter.matches(item))
                .cloned()
                .collect(),
        )
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ImageItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Add `w` (and optionally `h`) query params for storage-side resizing.
/// Returns the input unchanged if it isn't an absolute URL.
pub fn optimized_url(base: &str, width: u32, height: Option<u32>) -> String {
    let mut url = match Url::parse(base) {
        Ok(url) => url,
        Err(e) => {
            warn!("Failed to parse URL for optimization: {e}");
            return base.to_string();
        }
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "w" && k != "h")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept);
        query.append_pair("w", &width.to_string());
        if let Some(h) = height {
            query.append_pair("h", &h.to_string());
        }
    }

    url.to_string()
}

/// Screen-reader label for a gallery image
pub fn image_aria_label(alt: &str, index: usize, total: usize) -> String {
    format!("{alt}, Image {} of {total}", index + 1)
}

#[cfg(test)]
pub(crate) fn sample_items(n: usize) -> Vec<ImageItem> {
    (0..n)
        .map(|i| ImageItem {
            id: Some(i as u32 + 1),
            src: format!("https://cdn.example.com/img/{}.jpg", i + 1),
            alt: format!("Image {}", i + 1),
            caption: None,
            space: Some(if i % 2 == 0 { "wilson" } else { "courtyard" }.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_order_and_changes_generation() {
        let all = ImageCollection::new(sample_items(5));
        let wilson = all.filter_by_space(&SpaceFilter::Space("wilson".into()));

        let ids: Vec<_> = wilson.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3), Some(5)]);
        assert_ne!(all.generation(), wilson.generation());
    }

    #[test]
    fn test_filter_all_is_new_identity() {
        let all = ImageCollection::new(sample_items(3));
        let again = all.filter_by_space(&SpaceFilter::All);
        assert_eq!(again.items(), all.items());
        assert_ne!(again.generation(), all.generation());
    }

    #[test]
    fn test_item_without_space_only_matches_all() {
        let item = ImageItem {
            id: None,
            src: "a.jpg".into(),
            alt: "a".into(),
            caption: None,
            space: None,
        };
        assert!(SpaceFilter::All.matches(&item));
        assert!(!SpaceFilter::Space("loft".into()).matches(&item));
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: ImageItem =
            serde_json::from_str(r#"{"src": "https://x/1.jpg", "alt": "One"}"#).unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.caption, None);
        assert_eq!(item.space, None);
    }

    #[test]
    fn test_optimized_url_keeps_existing_params() {
        let url = optimized_url("https://storage.example.com/o/room%2F1.jpg?alt=media", 800, None);
        assert_eq!(url, "https://storage.example.com/o/room%2F1.jpg?alt=media&w=800");
    }

    #[test]
    fn test_optimized_url_with_height_replaces_old_size() {
        let url = optimized_url("https://x.com/a.jpg?w=10", 640, Some(480));
        assert_eq!(url, "https://x.com/a.jpg?w=640&h=480");
    }

    #[test]
    fn test_optimized_url_relative_passthrough() {
        assert_eq!(optimized_url("/placeholder.svg", 100, None), "/placeholder.svg");
    }

    #[test]
    fn test_aria_label() {
        assert_eq!(image_aria_label("The Loft 2", 1, 7), "The Loft 2, Image 2 of 7");
    }
}
