use dioxus::prelude::*;
use wb_common::{fetch_batch, GalleryConfig, ImageCollection, Preloader};

use super::LightboxHandle;
use crate::browser::{BrowserImageFetcher, BrowserSleeper};

/// Warm the neighbours of whatever the lightbox shows.
///
/// Re-plans whenever the displayed index or the collection changes. Each
/// batch commits in one write when all of its images have settled.
pub fn use_image_preloader(
    collection: &ImageCollection,
    lightbox: LightboxHandle,
    config: &GalleryConfig,
) -> Signal<Preloader> {
    let mut preloader = use_signal(|| Preloader::from_config(config));
    let mut last_key = use_signal(|| None::<(u64, usize)>);

    let key = lightbox
        .displayed_index()
        .map(|index| (collection.generation(), index));

    if key != *last_key.peek() {
        last_key.set(key);
        if let Some((_, current)) = key {
            let batch = preloader.write().plan(collection, current);
            if !batch.is_empty() {
                let timeout = preloader.peek().timeout();
                spawn(async move {
                    let report =
                        fetch_batch(&BrowserImageFetcher, &BrowserSleeper, batch, timeout).await;
                    if let Ok(mut guard) = preloader.try_write() {
                        guard.commit(&report);
                    }
                });
            }
        }
    }

    preloader
}
