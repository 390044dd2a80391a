//! Full-screen image viewer
//!
//! Renders whatever the `LightboxHandle` says is open. Keyboard, swipe,
//! pinch and double-tap all feed the same handle, and the neighbours of
//! the shown image are preloaded in the background.

use dioxus::prelude::*;
use wb_common::gesture::TouchPoint as GesturePoint;
use wb_common::{
    image_aria_label, GalleryConfig, GestureHandlers, GestureIntent, ImageCollection,
    KeyboardRouter, ZoomState,
};

use crate::components::icons::{ChevronLeftIcon, ChevronRightIcon, XIcon};
use crate::components::{LoadableImage, Modal, NavigationDots};
use crate::hooks::{
    touch_points, use_image_preloader, use_keyboard_navigation, use_touch_gestures,
    LightboxHandle,
};
use crate::wasm_utils::now_ms;

fn dispatch_gesture(intent: GestureIntent, lightbox: LightboxHandle, zoom: Signal<ZoomState>) {
    let mut pinch_zoom = zoom;
    let mut tap_zoom = zoom;
    let mut handlers = GestureHandlers {
        on_swipe_left: Some(Box::new(move || lightbox.next())),
        on_swipe_right: Some(Box::new(move || lightbox.previous())),
        on_pinch: Some(Box::new(move |scale| pinch_zoom.write().pinch(scale))),
        on_double_tap: Some(Box::new(move || tap_zoom.write().double_tap())),
    };
    handlers.dispatch(intent);
}

#[component]
pub fn Lightbox(
    images: ImageCollection,
    lightbox: LightboxHandle,
    #[props(default)] config: GalleryConfig,
    #[props(default)] router: KeyboardRouter,
) -> Element {
    use_keyboard_navigation(lightbox, router);
    use_image_preloader(&images, lightbox, &config);

    let mut recognizer = use_touch_gestures(&config);
    let mut zoom = use_signal(|| ZoomState::from_config(&config));
    let mut pan_anchor = use_signal(|| None::<GesturePoint>);
    let mut last_shown = use_signal(|| None::<usize>);

    let is_open = use_memo(move || lightbox.is_open());
    let is_open: ReadSignal<bool> = is_open.into();

    let shown = lightbox.displayed_index();
    if shown != *last_shown.peek() {
        last_shown.set(shown);
        if zoom.peek().is_zoomed() {
            zoom.write().reset();
        }
    }

    let total = images.len();
    let current = shown.and_then(|index| images.get(index).map(|item| (index, item.clone())));
    let announcement = lightbox.announcement().unwrap_or_default();
    let transform = zoom.read().css_transform();
    let timeout_ms = config.load_timeout_ms;

    rsx! {
        Modal {
            is_open,
            on_close: move |_| lightbox.close(),
            aria_label: "Image viewer",
            div {
                class: "relative flex flex-col items-center select-none touch-none",
                ontouchstart: move |evt: TouchEvent| {
                    let points = touch_points(&evt);
                    pan_anchor.set(points.first().copied().filter(|_| points.len() == 1));
                    let intent = recognizer.write().touch_start(&points, now_ms());
                    if let Some(intent) = intent {
                        dispatch_gesture(intent, lightbox, zoom);
                    }
                },
                ontouchmove: move |evt: TouchEvent| {
                    let points = touch_points(&evt);
                    let anchor = *pan_anchor.peek();
                    if let (Some(anchor), [point]) = (anchor, points.as_slice()) {
                        if zoom.peek().is_zoomed() {
                            zoom.write().pan(point.x - anchor.x, point.y - anchor.y);
                        }
                        pan_anchor.set(Some(*point));
                    }
                    let intent = recognizer.write().touch_move(&points);
                    if let Some(intent) = intent {
                        dispatch_gesture(intent, lightbox, zoom);
                    }
                },
                ontouchend: move |_| {
                    pan_anchor.set(None);
                    // Dragging a zoomed image is panning, not paging
                    let intent = recognizer.write().touch_end();
                    match intent {
                        Some(GestureIntent::SwipeLeft | GestureIntent::SwipeRight)
                            if zoom.peek().is_zoomed() => {}
                        Some(intent) => dispatch_gesture(intent, lightbox, zoom),
                        None => {}
                    }
                },

                button {
                    class: "fixed top-4 right-4 text-gray-300 hover:text-white transition-colors z-10",
                    aria_label: "Close image viewer",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        lightbox.close();
                    },
                    XIcon { class: "w-7 h-7" }
                }

                if total > 1 {
                    button {
                        class: "fixed left-4 top-1/2 -translate-y-1/2 w-12 h-12 bg-gray-800/60 hover:bg-gray-700/80 rounded-full flex items-center justify-center transition-colors z-10",
                        aria_label: "Previous image",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            lightbox.previous();
                        },
                        ChevronLeftIcon {
                            class: "w-7 h-7 text-gray-200 -translate-x-0.5",
                            stroke_width: "1.5",
                        }
                    }
                    button {
                        class: "fixed right-4 top-1/2 -translate-y-1/2 w-12 h-12 bg-gray-800/60 hover:bg-gray-700/80 rounded-full flex items-center justify-center transition-colors z-10",
                        aria_label: "Next image",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            lightbox.next();
                        },
                        ChevronRightIcon {
                            class: "w-7 h-7 text-gray-200 translate-x-0.5",
                            stroke_width: "1.5",
                        }
                    }
                }

                if let Some((index, item)) = current {
                    LoadableImage {
                        key: "{item.src}",
                        src: item.src.clone(),
                        alt: image_aria_label(&item.alt, index, total),
                        class: "w-[90vw] h-[75vh] flex items-center justify-center",
                        img_class: "max-w-full max-h-full object-contain rounded-lg shadow-2xl transition-transform duration-200",
                        style: "transform: {transform}",
                        eager: true,
                        timeout_ms,
                    }
                    div { class: "mt-4 flex flex-col items-center gap-2 text-gray-300",
                        span { class: "text-sm tabular-nums", "{index + 1} / {total}" }
                        if let Some(caption) = item.caption.as_ref() {
                            p { class: "text-base text-white max-w-[80vw] text-center", "{caption}" }
                        }
                        if total > 1 {
                            NavigationDots {
                                total,
                                current: index,
                                on_select: move |i| lightbox.go_to(i),
                            }
                        }
                    }
                }

                div {
                    class: "sr-only",
                    role: "status",
                    aria_live: "polite",
                    aria_atomic: "true",
                    "{announcement}"
                }
            }
        }
    }
}
