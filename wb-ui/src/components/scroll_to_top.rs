//! Resets the scroll position on every route change

use dioxus::prelude::*;
use dioxus_core::Task;
use tracing::debug;
use wb_common::{restore_scroll, ScrollPolicy};

use crate::browser::{BrowserScrollSurface, BrowserSleeper};
use crate::wasm_utils::viewport_width;

/// Renders nothing. Place once inside the router layout and pass the
/// current path.
///
/// A navigation that lands while the previous sequence is still running
/// cancels it; the cancelled sequence puts the scroll behavior back.
#[component]
pub fn ScrollToTop(path: String, #[props(default)] policy: ScrollPolicy) -> Element {
    let mut last_path = use_signal(|| None::<String>);
    let mut running = use_signal(|| None::<Task>);

    if last_path.peek().as_deref() != Some(path.as_str()) {
        last_path.set(Some(path.clone()));

        if let Some(task) = running.write().take() {
            task.cancel();
        }

        let plan = policy.plan_for_path(&path, viewport_width());
        debug!("Restoring scroll for {path} to {}px", plan.target);

        let task = spawn(async move {
            restore_scroll(&BrowserScrollSurface, &BrowserSleeper, &plan).await;
            if let Ok(mut guard) = running.try_write() {
                guard.take();
            }
        });
        running.set(Some(task));
    }

    use_drop(move || {
        if let Some(task) = running.peek().as_ref() {
            task.cancel();
        }
    });

    rsx! {}
}
