//! Adjacent-image preloading
//!
//! The preload window mirrors circular navigation: whatever `next()` or
//! `previous()` could reveal within `count` steps gets warmed. Completions
//! are committed to the loaded set in one call so a render never sees a
//! half-applied batch.

use crate::config::GalleryConfig;
use crate::error::LoadError;
use crate::image::ImageCollection;
use crate::loader::{load_with_timeout, ImageFetcher};
use crate::timer::Sleeper;
use futures::future::join_all;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Indices at offsets `-count..=-1` and `1..=count` around `current`, with
/// wraparound. Never includes `current`; no duplicates on small collections.
pub fn preload_indices(current: usize, len: usize, count: usize) -> Vec<usize> {
    if current >= len {
        return Vec::new();
    }
    // Steps past `len` only revisit indices
    let count = count.min(len);
    let mut indices = Vec::with_capacity(count.saturating_mul(2).min(len));
    for step in 1..=count {
        let step = step % len;
        let prev = (current + len - step) % len;
        let next = (current + step) % len;
        for idx in [prev, next] {
            if idx != current && !indices.contains(&idx) {
                indices.push(idx);
            }
        }
    }
    indices
}

/// Images to fetch for one index change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadBatch {
    pub generation: u64,
    pub targets: Vec<(usize, String)>,
}

impl PreloadBatch {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.targets.iter().map(|(idx, _)| *idx).collect()
    }
}

/// Outcome of a batch. Failures are informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub generation: u64,
    pub loaded: Vec<usize>,
    pub failed: Vec<(usize, LoadError)>,
}

/// Fetch a batch concurrently. Errors are logged and swallowed; the image
/// will just be fetched on demand if the user gets there.
pub async fn fetch_batch<F, S>(
    fetcher: &F,
    sleeper: &S,
    batch: PreloadBatch,
    timeout: Duration,
) -> PreloadReport
where
    F: ImageFetcher + ?Sized,
    S: Sleeper + ?Sized,
{
    let results = join_all(batch.targets.into_iter().map(|(idx, src)| async move {
        let result = load_with_timeout(fetcher, sleeper, &src, timeout).await;
        (idx, result)
    }))
    .await;

    let mut report = PreloadReport {
        generation: batch.generation,
        ..Default::default()
    };
    for (idx, result) in results {
        match result {
            Ok(()) => report.loaded.push(idx),
            Err(e) => {
                warn!("Failed to preload image at index {idx}: {e}");
                report.failed.push((idx, e));
            }
        }
    }
    report
}

/// Tracks which indices are warm (or being warmed) for the current collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preloader {
    count: usize,
    timeout: Duration,
    generation: u64,
    loaded: BTreeSet<usize>,
    in_flight: BTreeSet<usize>,
}

impl Default for Preloader {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(10_000))
    }
}

impl Preloader {
    pub fn new(count: usize, timeout: Duration) -> Self {
        Self {
            count,
            timeout,
            generation: 0,
            loaded: BTreeSet::new(),
            in_flight: BTreeSet::new(),
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(config.preload_count, config.load_timeout())
    }

    /// Forget everything. Indices from another collection mean nothing here.
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.loaded.clear();
        self.in_flight.clear();
    }

    /// Work out what to fetch around `current`, skipping warm and in-flight
    /// indices, and mark the result in flight.
    pub fn plan(&mut self, collection: &ImageCollection, current: usize) -> PreloadBatch {
        if collection.generation() != self.generation {
            self.reset(collection.generation());
        }

        let targets: Vec<(usize, String)> = preload_indices(current, collection.len(), self.count)
            .into_iter()
            .filter(|idx| !self.loaded.contains(idx) && !self.in_flight.contains(idx))
            .filter_map(|idx| collection.get(idx).map(|item| (idx, item.src.clone())))
            .collect();

        self.in_flight.extend(targets.iter().map(|(idx, _)| *idx));

        PreloadBatch {
            generation: self.generation,
            targets,
        }
    }

    /// Apply a finished batch in one step. Reports from an older collection
    /// are dropped.
    pub fn commit(&mut self, report: &PreloadReport) -> bool {
        if report.generation != self.generation {
            debug!("Dropping preload report for stale collection");
            return false;
        }
        for idx in report.loaded.iter().chain(report.failed.iter().map(|(idx, _)| idx)) {
            self.in_flight.remove(idx);
        }
        self.loaded.extend(report.loaded.iter().copied());
        true
    }

    /// Plan, fetch and commit in one go.
    pub async fn run<F, S>(
        &mut self,
        collection: &ImageCollection,
        current: usize,
        fetcher: &F,
        sleeper: &S,
    ) -> PreloadReport
    where
        F: ImageFetcher + ?Sized,
        S: Sleeper + ?Sized,
    {
        let batch = self.plan(collection, current);
        if batch.is_empty() {
            return PreloadReport {
                generation: batch.generation,
                ..Default::default()
            };
        }
        let report = fetch_batch(fetcher, sleeper, batch, self.timeout).await;
        self.commit(&report);
        report
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.contains(&index)
    }

    pub fn loaded_indices(&self) -> &BTreeSet<usize> {
        &self.loaded
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }
}
