//! wb-ui - Gallery components for the Wilson & Bay site
//!
//! Binds the `wb-common` state machines to Dioxus: the thumbnail grid, the
//! lightbox, loadable images, scroll restoration and the browser adapters
//! they run on.

pub mod browser;
pub mod components;
pub mod hooks;
pub mod stores;
pub mod wasm_utils;

pub use components::*;
pub use hooks::*;
