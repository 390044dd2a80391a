//! Hooks that bind the gallery state machines to Dioxus signals

mod gestures;
mod keyboard;
mod lightbox;
mod preloader;

pub use gestures::{touch_points, use_touch_gestures};
pub use keyboard::use_keyboard_navigation;
pub use lightbox::{use_lightbox, LightboxHandle};
pub use preloader::use_image_preloader;
