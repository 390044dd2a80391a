//! Browser implementations of the gallery's platform capabilities
//!
//! Each adapter is a unit struct so components can construct one wherever
//! they need it. Outside a browser they degrade to no-ops or plain timers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use tracing::debug;
use wasm_bindgen_x::prelude::*;
use wb_common::{
    ImageFetcher, ImageProbe, LoadError, PlatformSleeper, ProbeResult, ScrollBehavior,
    ScrollSurface, Sleeper,
};

/// Asks a detached `<img>` whether the URL is already decoded in cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserImageProbe;

impl ImageProbe for BrowserImageProbe {
    fn check(&self, uri: &str) -> ProbeResult {
        // An empty src reports `complete` too
        if uri.is_empty() {
            return ProbeResult::default();
        }
        let Ok(img) = web_sys_x::HtmlImageElement::new() else {
            return ProbeResult::default();
        };
        img.set_src(uri);
        ProbeResult {
            cached: img.complete() && img.natural_width() > 0,
        }
    }
}

/// Loads through a detached `<img>` so the bytes land in the same cache the
/// visible elements read from.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserImageFetcher;

/// Owns the handlers of an in-flight detached image. Dropping it unhooks
/// them and, if nothing settled yet, aborts the request.
struct PendingImage {
    img: web_sys_x::HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
    settled: bool,
}

impl Drop for PendingImage {
    fn drop(&mut self) {
        self.img.set_onload(None);
        self.img.set_onerror(None);
        if !self.settled {
            self.img.set_src("");
        }
    }
}

#[async_trait(?Send)]
impl ImageFetcher for BrowserImageFetcher {
    async fn fetch(&self, uri: &str) -> Result<(), LoadError> {
        let network = || LoadError::Network {
            src: uri.to_string(),
        };
        let img = web_sys_x::HtmlImageElement::new().map_err(|_| network())?;

        let (tx, rx) = oneshot::channel::<bool>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let settle = |ok: bool| {
            let tx = tx.clone();
            Closure::wrap(Box::new(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(ok);
                }
            }) as Box<dyn FnMut()>)
        };
        let onload = settle(true);
        let onerror = settle(false);
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let mut pending = PendingImage {
            img,
            _onload: onload,
            _onerror: onerror,
            settled: false,
        };
        pending.img.set_src(uri);

        let loaded = rx.await.unwrap_or(false);
        pending.settled = true;

        if loaded {
            Ok(())
        } else {
            Err(network())
        }
    }
}

/// Timers plus real animation frames
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSleeper;

/// Cancels a frame request nobody is waiting for any more.
struct FrameRequest {
    window: web_sys_x::Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
    fired: bool,
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        if !self.fired {
            let _ = self.window.cancel_animation_frame(self.handle);
        }
    }
}

#[async_trait(?Send)]
impl Sleeper for BrowserSleeper {
    async fn sleep(&self, duration: Duration) {
        PlatformSleeper.sleep(duration).await;
    }

    async fn next_frame(&self) {
        let Some(window) = web_sys_x::window() else {
            PlatformSleeper.next_frame().await;
            return;
        };

        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        }) as Box<dyn FnMut()>);

        let Ok(handle) = window.request_animation_frame(callback.as_ref().unchecked_ref()) else {
            debug!("requestAnimationFrame unavailable, falling back to a timer");
            PlatformSleeper.next_frame().await;
            return;
        };

        let mut request = FrameRequest {
            window,
            handle,
            _callback: callback,
            fired: false,
        };
        let _ = rx.await;
        request.fired = true;
    }
}

/// The window and its root element
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScrollSurface;

fn root_style() -> Option<web_sys_x::CssStyleDeclaration> {
    let root = web_sys_x::window()?.document()?.document_element()?;
    let root: web_sys_x::HtmlElement = root.dyn_into().ok()?;
    Some(root.style())
}

impl ScrollSurface for BrowserScrollSurface {
    fn scroll_to(&self, y: f64) {
        let Some(window) = web_sys_x::window() else {
            return;
        };
        window.scroll_to_with_x_and_y(0.0, y);

        // Some mobile browsers scroll the root element, some the body
        if let Some(document) = window.document() {
            if let Some(root) = document.document_element() {
                root.set_scroll_top(y as i32);
            }
            if let Some(body) = document.body() {
                body.set_scroll_top(y as i32);
            }
        }
    }

    fn scroll_behavior(&self) -> ScrollBehavior {
        root_style()
            .and_then(|style| style.get_property_value("scroll-behavior").ok())
            .map(|value| ScrollBehavior::from_css(&value))
            .unwrap_or_default()
    }

    fn set_scroll_behavior(&self, behavior: ScrollBehavior) {
        let Some(style) = root_style() else {
            return;
        };
        let _ = match behavior {
            ScrollBehavior::Unset => style.remove_property("scroll-behavior").map(|_| ()),
            other => style.set_property("scroll-behavior", other.as_css()),
        };
    }
}
