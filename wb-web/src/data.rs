//! Embedded site data: the image list and the venue's spaces

use tracing::error;
use wb_common::{GalleryConfig, GalleryData, GalleryError, ImageCollection, SpaceFilter};

const GALLERY_JSON: &str = include_str!("../assets/gallery.json");

/// A bookable space with its own page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceInfo {
    /// Route segment and image `space` tag
    pub slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
}

pub const SPACES: &[SpaceInfo] = &[
    SpaceInfo {
        slug: "wilson",
        name: "The Wilson Room",
        tagline: "Our main hall, for dinners and dancing up to 150 guests",
    },
    SpaceInfo {
        slug: "courtyard",
        name: "The Courtyard",
        tagline: "Open air ceremonies under the string lights",
    },
    SpaceInfo {
        slug: "loft",
        name: "The Loft",
        tagline: "An intimate upstairs room for smaller gatherings",
    },
];

pub fn space_by_slug(slug: &str) -> Option<&'static SpaceInfo> {
    SPACES.iter().find(|s| s.slug == slug)
}

impl SpaceInfo {
    pub fn filter(&self) -> SpaceFilter {
        SpaceFilter::Space(self.slug.to_string())
    }
}

pub fn parse_gallery() -> Result<GalleryData, GalleryError> {
    GalleryData::from_json(GALLERY_JSON)
}

/// The embedded data, or an empty gallery with default config if the file
/// is broken. The site still renders; the grids show their empty state.
pub fn load_gallery() -> GalleryData {
    parse_gallery().unwrap_or_else(|e| {
        error!("Failed to load gallery data: {e}");
        GalleryData {
            config: GalleryConfig::default(),
            images: Vec::new(),
        }
    })
}

/// Images of one space, as their own collection
pub fn space_images(data: &GalleryData, slug: &str) -> ImageCollection {
    data.collection()
        .filter_by_space(&SpaceFilter::Space(slug.to_string()))
}
