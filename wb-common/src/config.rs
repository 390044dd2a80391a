//! Gallery tuning knobs and the site data file that carries them

use crate::error::GalleryError;
use crate::image::{ImageCollection, ImageItem};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_swipe_threshold() -> f64 {
    50.0
}

fn default_double_tap_ms() -> f64 {
    300.0
}

fn default_preload_count() -> usize {
    2
}

/// Neighbours warmed on each side of the shown image, at most
pub const MAX_PRELOAD_COUNT: usize = 10;

fn default_load_timeout_ms() -> u64 {
    10_000
}

fn default_min_zoom() -> f64 {
    1.0
}

fn default_max_zoom() -> f64 {
    3.0
}

fn default_mobile_header_px() -> f64 {
    56.0
}

fn default_desktop_header_px() -> f64 {
    64.0
}

fn default_header_buffer_px() -> f64 {
    8.0
}

fn default_mobile_breakpoint_px() -> f64 {
    600.0
}

fn default_scroll_retry_delays_ms() -> Vec<u64> {
    vec![50, 150]
}

fn default_scroll_restore_delay_ms() -> u64 {
    100
}

/// Gallery configuration. Every field has a default, so a partial (or empty)
/// `config` object in the data file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Minimum horizontal travel (px) before a touch counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Max gap (ms) between two touch-starts for a double tap
    #[serde(default = "default_double_tap_ms")]
    pub double_tap_ms: f64,
    /// Images to warm on each side of the current one
    #[serde(default = "default_preload_count")]
    pub preload_count: usize,
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    #[serde(default = "default_mobile_header_px")]
    pub mobile_header_px: f64,
    #[serde(default = "default_desktop_header_px")]
    pub desktop_header_px: f64,
    #[serde(default = "default_header_buffer_px")]
    pub header_buffer_px: f64,
    /// Viewports narrower than this are treated as mobile
    #[serde(default = "default_mobile_breakpoint_px")]
    pub mobile_breakpoint_px: f64,
    /// Extra scroll attempts after the animation-frame pass. Tunable, not a contract.
    #[serde(default = "default_scroll_retry_delays_ms")]
    pub scroll_retry_delays_ms: Vec<u64>,
    #[serde(default = "default_scroll_restore_delay_ms")]
    pub scroll_restore_delay_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            double_tap_ms: default_double_tap_ms(),
            preload_count: default_preload_count(),
            load_timeout_ms: default_load_timeout_ms(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            mobile_header_px: default_mobile_header_px(),
            desktop_header_px: default_desktop_header_px(),
            header_buffer_px: default_header_buffer_px(),
            mobile_breakpoint_px: default_mobile_breakpoint_px(),
            scroll_retry_delays_ms: default_scroll_retry_delays_ms(),
            scroll_restore_delay_ms: default_scroll_restore_delay_ms(),
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), GalleryError> {
        if !(self.swipe_threshold >= 0.0) {
            return Err(GalleryError::Config(format!(
                "swipe_threshold must be non-negative, got {}",
                self.swipe_threshold
            )));
        }
        if !(self.double_tap_ms > 0.0) {
            return Err(GalleryError::Config(format!(
                "double_tap_ms must be positive, got {}",
                self.double_tap_ms
            )));
        }
        if self.preload_count > MAX_PRELOAD_COUNT {
            return Err(GalleryError::Config(format!(
                "preload_count must be at most {MAX_PRELOAD_COUNT}, got {}",
                self.preload_count
            )));
        }
        if self.load_timeout_ms == 0 {
            return Err(GalleryError::Config(
                "load_timeout_ms must be positive".to_string(),
            ));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(GalleryError::Config(format!(
                "zoom bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

/// The site's image data file: optional config plus the flat image list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryData {
    #[serde(default)]
    pub config: GalleryConfig,
    pub images: Vec<ImageItem>,
}

impl GalleryData {
    /// Parse and validate a data file.
    pub fn from_json(json: &str) -> Result<Self, GalleryError> {
        let data: GalleryData = serde_json::from_str(json)?;
        data.config.validate()?;
        Ok(data)
    }

    pub fn collection(&self) -> ImageCollection {
        ImageCollection::new(self.images.clone())
    }
}
