//! Image with a loading skeleton, an error state and manual retry
//!
//! The `<img>` is keyed by the tracker's attempt counter, so a retry mounts
//! a fresh element and the browser issues a new request. Every requested
//! attempt gets a watchdog that turns a hung request into a timeout error.
//!
//! Lazy images aren't fetched until they near the viewport, so their
//! watchdog waits for a `VisibilityObserver` to report the element in view.
//! The `<img>` stays mounted under the error overlay, so a request that
//! finishes after its timeout still settles the image as loaded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_core::{Runtime, RuntimeGuard, Task};
use tracing::{debug, warn};
use wb_common::{ImageLoadTracker, LoadError, LoadTicket, Sleeper};

use crate::browser::{BrowserImageProbe, BrowserSleeper};
use crate::components::icons::{ImageOffIcon, RefreshIcon};
use crate::wasm_utils::VisibilityObserver;

static IMAGE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pulsing placeholder shown while an image loads
#[component]
pub fn ImageSkeleton(#[props(default)] class: String) -> Element {
    rsx! {
        div {
            class: "absolute inset-0 animate-pulse bg-gray-700/60 {class}",
            aria_hidden: "true",
        }
    }
}

#[component]
pub fn LoadableImage(
    src: String,
    alt: String,
    /// Classes for the wrapper
    #[props(default)]
    class: String,
    /// Classes for the `<img>`
    #[props(default)]
    img_class: String,
    /// Inline style for the `<img>` (zoom transform)
    #[props(default)]
    style: String,
    /// Above-the-fold images skip lazy loading
    #[props(default)]
    eager: bool,
    #[props(default = 10_000)] timeout_ms: u64,
) -> Element {
    let wrapper_id = use_hook(|| {
        let id = IMAGE_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("loadable-image-{}", id)
    });
    let mut tracker = use_signal(ImageLoadTracker::new);
    let mut watchdog = use_signal(|| None::<Task>);
    // Sticky: once the element has been in view the browser fetches at once
    let mut in_view = use_signal(|| eager);
    let mut observer = use_signal(|| None::<VisibilityObserver>);

    let mut arm_watchdog = move |ticket: LoadTicket| {
        if let Some(task) = watchdog.write().take() {
            task.cancel();
        }
        if !tracker.peek().can_time_out(&ticket) {
            return;
        }
        let task = spawn(async move {
            BrowserSleeper.sleep(Duration::from_millis(timeout_ms)).await;
            if tracker.peek().can_time_out(&ticket) {
                warn!("Image load timed out after {timeout_ms}ms: {}", ticket.src);
                let src = ticket.src.clone();
                tracker
                    .write()
                    .complete(&ticket, Err(LoadError::Timeout { src, timeout_ms }));
            }
        });
        watchdog.set(Some(task));
    };

    // New src: start over, skipping the skeleton if the image is cached
    if tracker.peek().src() != src || tracker.peek().attempt() == 0 {
        let ticket = if *in_view.peek() {
            tracker.write().begin(&src, &BrowserImageProbe)
        } else {
            tracker.write().begin_lazy(&src, &BrowserImageProbe)
        };
        arm_watchdog(ticket);
    }

    let observed_id = wrapper_id.clone();
    use_effect(move || {
        if in_view() {
            if let Some(attached) = observer.write().take() {
                drop(attached);
            }
            return;
        }
        if observer.peek().is_some() {
            return;
        }

        // The callback runs from wasm-bindgen, outside the Dioxus runtime
        let runtime = Runtime::current();
        let attached = VisibilityObserver::observe_id(&observed_id, move || {
            let _guard = RuntimeGuard::new(runtime.clone());
            if let Ok(mut seen) = in_view.try_write() {
                if !*seen {
                    *seen = true;
                }
            }
        });
        observer.set(attached);
    });

    // Coming into view is when a lazy request actually starts
    use_effect(move || {
        if !in_view() {
            return;
        }
        let ticket = tracker.peek().ticket();
        let started = tracker.write().mark_requested(&ticket);
        if started {
            arm_watchdog(ticket);
        }
    });

    use_drop(move || {
        if let Some(task) = watchdog.write().take() {
            task.cancel();
        }
        // Dropping JS refs during scope teardown triggers synchronous IPC
        // inside the diff on desktop; defer it.
        if let Some(attached) = observer.write().take() {
            spawn(async move {
                drop(attached);
            });
        }
    });

    let (state, ticket) = {
        let tracker = tracker.read();
        (tracker.state().clone(), tracker.ticket())
    };
    let attempt = ticket.attempt;
    let loading = state.is_loading();
    let failed = state.is_error();

    let mut settle = move |ticket: &LoadTicket, result: Result<(), LoadError>| {
        if let Err(e) = &result {
            debug!("Image failed: {e}");
        }
        if !tracker.write().complete(ticket, result) {
            return;
        }
        if let Some(task) = watchdog.write().take() {
            task.cancel();
        }
    };

    let onload_ticket = ticket.clone();
    let onerror_ticket = ticket;
    let fade = if loading || failed {
        "opacity-0"
    } else {
        "opacity-100"
    };
    let loading_attr = if eager { "eager" } else { "lazy" };

    rsx! {
        div { id: "{wrapper_id}", class: "relative overflow-hidden {class}",
            if loading {
                ImageSkeleton {}
            }
            img {
                key: "{attempt}",
                src: "{src}",
                alt: "{alt}",
                loading: "{loading_attr}",
                class: "transition-opacity duration-300 {fade} {img_class}",
                style: "{style}",
                onload: move |_| settle(&onload_ticket, Ok(())),
                onerror: move |_| {
                    let src = onerror_ticket.src.clone();
                    settle(&onerror_ticket, Err(LoadError::Network { src }))
                },
            }
            if failed {
                div {
                    class: "absolute inset-0 flex flex-col items-center justify-center gap-2 bg-gray-800 text-gray-400",
                    role: "alert",
                    ImageOffIcon { class: "w-8 h-8" }
                    span { class: "text-sm", "Failed to load image" }
                    button {
                        class: "flex items-center gap-1 px-3 py-1 rounded-full bg-gray-700 hover:bg-gray-600 text-gray-200 text-sm transition-colors",
                        aria_label: "Retry loading image",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            let ticket = tracker.write().retry();
                            arm_watchdog(ticket);
                        },
                        // Enter/Space belong to this button, not to an
                        // activating ancestor
                        onkeydown: move |evt| evt.stop_propagation(),
                        RefreshIcon { class: "w-4 h-4" }
                        "Retry"
                    }
                }
            }
        }
    }
}
