use crate::data::{space_by_slug, space_images};
use crate::Route;
use dioxus::prelude::*;
use wb_common::GalleryData;
use wb_ui::{use_lightbox, GalleryGrid, Lightbox};

#[component]
pub fn Space(space: String) -> Element {
    let data: GalleryData = use_context();
    let mut images = use_signal(|| space_images(&data, &space));
    let mut last_space = use_signal(|| space.clone());

    // Same component instance, different route param
    if *last_space.peek() != space {
        last_space.set(space.clone());
        images.set(space_images(&data, &space));
    }

    let images = images.read().clone();
    let lightbox = use_lightbox(&images);

    let Some(info) = space_by_slug(&space) else {
        return rsx! {
            section { class: "max-w-xl mx-auto px-4 py-24 text-center",
                h1 { class: "text-3xl font-serif mb-4", "Unknown space" }
                Link { class: "underline", to: Route::Gallery {}, "Browse the gallery" }
            }
        };
    };

    rsx! {
        section { class: "max-w-6xl mx-auto px-4 py-8",
            h1 { class: "text-3xl min-[600px]:text-5xl font-serif mb-2", "{info.name}" }
            p { class: "text-stone-400 mb-8", "{info.tagline}" }
            GalleryGrid {
                images: images.clone(),
                lightbox,
                show_all_button: true,
                timeout_ms: data.config.load_timeout_ms,
            }
            Lightbox { images, lightbox, config: data.config.clone() }
        }
    }
}
