//! Gallery page state store

use dioxus::prelude::*;
use wb_common::{GalleryConfig, ImageCollection, SpaceFilter};

/// One filter tab on the gallery page
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceTab {
    pub label: String,
    pub filter: SpaceFilter,
}

/// State for a gallery page
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct GalleryState {
    /// Every image the page can show
    pub images: ImageCollection,
    /// Active filter tab
    pub filter: SpaceFilter,
    /// Available tabs, "All" first
    pub tabs: Vec<SpaceTab>,
    pub config: GalleryConfig,
}

/// The images `filter` lets through. `All` keeps the collection's identity;
/// any other filter yields a new collection.
pub fn visible_images(images: &ImageCollection, filter: &SpaceFilter) -> ImageCollection {
    match filter {
        SpaceFilter::All => images.clone(),
        filter => images.filter_by_space(filter),
    }
}

impl GalleryState {
    pub fn visible(&self) -> ImageCollection {
        visible_images(&self.images, &self.filter)
    }
}
