//! Modal overlay on a native HTML `<dialog>`
//!
//! `showModal()` gives us top-layer rendering, a focus trap, Escape via the
//! `cancel` event and a `::backdrop` for free. The dialog manages its own
//! display, so layout lives on an inner fixed container.
//!
//! `cancel` only fires from user actions, never from a programmatic
//! `close()`. `showModal()` throws if the dialog is already open, hence the
//! `open` attribute check.

use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use wasm_bindgen_x::JsCast;

static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Call a zero-argument method on the dialog element by name.
fn call_dialog_method(element: &web_sys_x::Element, method: &str) {
    if let Ok(func) = js_sys_x::Reflect::get(element, &method.into()) {
        if let Some(func) = func.dyn_ref::<js_sys_x::Function>() {
            let _ = func.call0(element);
        }
    }
}

#[component]
pub fn Modal(
    is_open: ReadSignal<bool>,
    /// Escape, backdrop click
    on_close: EventHandler<()>,
    children: Element,
    /// Accessible name of the dialog
    aria_label: String,
    #[props(default = true)] dismiss_on_backdrop: bool,
    #[props(default)] class: Option<String>,
) -> Element {
    let dialog_id = use_hook(|| {
        let id = MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("modal-{}", id)
    });
    let dialog_id_for_effect = dialog_id.clone();

    use_effect(move || {
        let is_open = is_open();

        let Some(element) = web_sys_x::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&dialog_id_for_effect))
        else {
            return;
        };

        // Effects can rerun, keep it idempotent
        match (is_open, element.has_attribute("open")) {
            (true, false) => call_dialog_method(&element, "showModal"),
            (false, true) => call_dialog_method(&element, "close"),
            _ => {}
        }
    });

    let dialog_class = class.unwrap_or_default();

    // No display classes on the dialog itself: they would override the
    // native display:none while closed.
    rsx! {
        dialog {
            id: "{dialog_id}",
            class: "p-0 m-0 max-w-none max-h-none bg-transparent backdrop:bg-black/90 {dialog_class}",
            aria_modal: "true",
            aria_label: "{aria_label}",
            oncancel: move |evt| {
                evt.prevent_default();
                on_close.call(());
            },
            if is_open() {
                div {
                    class: "fixed inset-0 flex items-center justify-center",
                    onclick: move |_| {
                        if dismiss_on_backdrop {
                            on_close.call(());
                        }
                    },
                    div { onclick: move |evt| evt.stop_propagation(), {children} }
                }
            }
        }
    }
}
