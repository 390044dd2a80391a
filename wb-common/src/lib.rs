//! wb-common - Headless gallery logic for the Wilson & Bay site
//!
//! Everything here is pure state and policy with no DOM access, so it can be
//! unit-tested natively. `wb-ui` binds these types to the browser.

pub mod config;
pub mod error;
pub mod gesture;
pub mod image;
pub mod keyboard;
pub mod lightbox;
pub mod loader;
pub mod preload;
pub mod scroll;
pub mod timer;
pub mod zoom;

pub use config::{GalleryConfig, GalleryData};
pub use error::{GalleryError, LoadError};
pub use gesture::{GestureHandlers, GestureIntent, GestureRecognizer, TouchPoint};
pub use image::{image_aria_label, optimized_url, ImageCollection, ImageItem, SpaceFilter};
pub use keyboard::{map_key, KeyCommand, KeyDisposition, KeyListenerSlot, KeyboardRouter};
pub use lightbox::LightboxController;
pub use loader::{
    load_with_timeout, ImageFetcher, ImageLoadState, ImageLoadTracker, ImageProbe, LoadTicket,
    ProbeResult,
};
pub use preload::{fetch_batch, preload_indices, PreloadBatch, PreloadReport, Preloader};
pub use scroll::{
    is_home_path, restore_scroll, DeviceClass, ScrollBehavior, ScrollPlan, ScrollPolicy,
    ScrollStep, ScrollSurface,
};
pub use timer::{PlatformSleeper, Sleeper};
pub use zoom::ZoomState;
