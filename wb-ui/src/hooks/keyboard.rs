use dioxus::prelude::*;
use dioxus_core::{Runtime, RuntimeGuard};
use wasm_bindgen_x::{JsCast, JsValue};
use wb_common::{KeyListenerSlot, KeyboardRouter};

use super::LightboxHandle;
use crate::wasm_utils::EventListener;

/// Window `keydown` listener that exists only while the lightbox is open.
///
/// Mapped keys get `preventDefault` so arrows and Home/End don't scroll
/// the page behind the overlay.
pub fn use_keyboard_navigation(lightbox: LightboxHandle, router: KeyboardRouter) {
    let mut slot: Signal<KeyListenerSlot<EventListener>> = use_signal(KeyListenerSlot::new);

    use_effect(move || {
        let is_open = lightbox.is_open();
        if !slot.peek().needs_sync(is_open) {
            return;
        }

        // The callback runs from wasm-bindgen, outside the Dioxus runtime
        let runtime = Runtime::current();

        let detached = slot.write().sync(is_open, || {
            EventListener::on_window("keydown", move |event: JsValue| {
                let Ok(event) = event.dyn_into::<web_sys_x::KeyboardEvent>() else {
                    return;
                };
                let _guard = RuntimeGuard::new(runtime.clone());
                let disposition = lightbox.handle_key(&router, &event.key());
                if disposition.prevent_default {
                    event.prevent_default();
                }
            })
        });
        drop(detached);
    });

    use_drop(move || {
        // Dropping JS refs during scope teardown triggers synchronous IPC
        // inside the diff on desktop; defer it.
        if let Some(attached) = slot.write().take() {
            spawn(async move {
                drop(attached);
            });
        }
    });
}
