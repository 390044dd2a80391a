//! Thumbnail grid that opens the lightbox

use dioxus::prelude::*;
use wb_common::{image_aria_label, optimized_url, ImageCollection};

use crate::components::icons::ImageIcon;
use crate::components::LoadableImage;
use crate::hooks::LightboxHandle;

/// Enter and Space open a focused thumbnail, like a native button
fn activates_thumbnail(key: &Key) -> bool {
    match key {
        Key::Enter => true,
        Key::Character(c) => c == " ",
        _ => false,
    }
}

#[component]
pub fn GalleryGrid(
    images: ImageCollection,
    lightbox: LightboxHandle,
    /// Width requested from the image host for thumbnails
    #[props(default = 800)]
    thumb_width: u32,
    /// Leading thumbnails that load eagerly (above the fold)
    #[props(default = 4)]
    eager_count: usize,
    /// Overlay a "Show all photos" button on the grid
    #[props(default)]
    show_all_button: bool,
    /// Only render the first `limit` thumbnails; the lightbox still pages
    /// through the whole collection
    #[props(default)]
    limit: Option<usize>,
    #[props(default = 10_000)] timeout_ms: u64,
) -> Element {
    let total = images.len();
    let shown = limit.unwrap_or(total).min(total);

    if total == 0 {
        return rsx! {
            div { class: "py-16 text-center text-gray-400", "No photos to show yet" }
        };
    }

    rsx! {
        div { class: "relative",
            ul {
                class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-2",
                role: "list",
                for (index , item) in images.items().iter().take(shown).enumerate() {
                    li { key: "{index}-{item.src}",
                        // Not a <button>: the tile can hold a Retry button
                        div {
                            class: "block w-full aspect-[4/3] rounded-lg overflow-hidden focus:outline-none focus-visible:ring-2 focus-visible:ring-white cursor-zoom-in",
                            role: "button",
                            tabindex: "0",
                            aria_label: "{image_aria_label(&item.alt, index, total)}",
                            onclick: move |_| lightbox.open(index),
                            onkeydown: move |evt: KeyboardEvent| {
                                if activates_thumbnail(&evt.key()) {
                                    evt.prevent_default();
                                    lightbox.open(index);
                                }
                            },
                            LoadableImage {
                                src: optimized_url(&item.src, thumb_width, None),
                                alt: item.alt.clone(),
                                class: "w-full h-full",
                                img_class: "w-full h-full object-cover hover:scale-105 transition-transform duration-300",
                                eager: index < eager_count,
                                timeout_ms,
                            }
                        }
                    }
                }
            }
            if show_all_button {
                button {
                    class: "absolute bottom-4 right-4 flex items-center gap-2 px-3 py-1.5 rounded-full bg-gray-700 hover:bg-gray-600 text-white text-sm shadow-lg",
                    onclick: move |_| lightbox.open(0),
                    ImageIcon { class: "w-4 h-4" }
                    "Show all photos"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_space_activate() {
        assert!(activates_thumbnail(&Key::Enter));
        assert!(activates_thumbnail(&Key::Character(" ".into())));
    }

    #[test]
    fn test_other_keys_pass_through() {
        assert!(!activates_thumbnail(&Key::Tab));
        assert!(!activates_thumbnail(&Key::Escape));
        assert!(!activates_thumbnail(&Key::Character("a".into())));
    }
}
