//! WASM utilities for browser interop
//!
//! # Event Listener Cleanup Pattern
//!
//! A JavaScript listener backed by a Rust `Closure` must not outlive the
//! closure, and `closure.forget()` leaks both. `EventListener` owns the
//! closure and removes the listener in `Drop`:
//!
//! ```ignore
//! // Attached here
//! let listener = EventListener::new(window.into(), "keydown", callback);
//!
//! // Detached here (or whenever `listener` goes out of scope)
//! drop(listener);
//! ```
//!
//! With Dioxus, keep the listener in a `Signal<Option<EventListener>>` and
//! set it to `None` to detach.

use wasm_bindgen_x::prelude::*;

/// An event listener on a window, document or element that removes itself
/// when dropped.
pub struct EventListener {
    target: web_sys_x::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(wasm_bindgen_x::JsValue)>,
}

impl EventListener {
    pub fn new(
        target: web_sys_x::EventTarget,
        event_name: &'static str,
        callback: impl FnMut(wasm_bindgen_x::JsValue) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(wasm_bindgen_x::JsValue)> =
            Closure::wrap(Box::new(callback));

        target
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Self {
            target,
            event_name,
            callback,
        }
    }

    /// Attach to the global window. `None` outside a browser.
    pub fn on_window(
        event_name: &'static str,
        callback: impl FnMut(wasm_bindgen_x::JsValue) + 'static,
    ) -> Option<Self> {
        let window = web_sys_x::window()?;
        Some(Self::new(window.into(), event_name, callback))
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Reports when an element starts intersecting the viewport. Disconnects
/// when dropped.
pub struct VisibilityObserver {
    observer: web_sys_x::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys_x::Array)>,
}

impl VisibilityObserver {
    /// Observe the element with `id`. `None` if it isn't in the document.
    pub fn observe_id(id: &str, mut on_visible: impl FnMut() + 'static) -> Option<Self> {
        let element = web_sys_x::window()?.document()?.get_element_by_id(id)?;

        let callback: Closure<dyn FnMut(js_sys_x::Array)> =
            Closure::wrap(Box::new(move |entries: js_sys_x::Array| {
                let visible = entries.iter().any(|entry| {
                    entry
                        .dyn_into::<web_sys_x::IntersectionObserverEntry>()
                        .map(|entry| entry.is_intersecting())
                        .unwrap_or(false)
                });
                if visible {
                    on_visible();
                }
            }));

        let observer =
            web_sys_x::IntersectionObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        observer.observe(&element);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Monotonic milliseconds for gesture timing. Falls back to wall clock
/// time when `performance` is unavailable.
pub fn now_ms() -> f64 {
    web_sys_x::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys_x::Date::now)
}

/// Layout viewport width in CSS pixels, 0 if unknown
pub fn viewport_width() -> f64 {
    web_sys_x::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}
