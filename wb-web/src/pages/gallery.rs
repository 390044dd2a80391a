use crate::data::SPACES;
use dioxus::prelude::*;
use wb_common::{GalleryData, SpaceFilter};
use wb_ui::stores::{visible_images, GalleryState, GalleryStateStoreExt, SpaceTab};
use wb_ui::{use_lightbox, GalleryGrid, Lightbox};

fn filter_tabs() -> Vec<SpaceTab> {
    let mut tabs = vec![SpaceTab {
        label: "All Spaces".to_string(),
        filter: SpaceFilter::All,
    }];
    tabs.extend(SPACES.iter().map(|space| SpaceTab {
        label: space.name.to_string(),
        filter: space.filter(),
    }));
    tabs
}

#[component]
pub fn Gallery() -> Element {
    let data: GalleryData = use_context();
    let state = use_store(move || GalleryState {
        images: data.collection(),
        filter: SpaceFilter::All,
        tabs: filter_tabs(),
        config: data.config.clone(),
    });

    // A new filter means a new collection: the lightbox closes and rewinds
    let visible = use_memo(move || visible_images(&state.images().read(), &state.filter().read()));

    let images = visible();
    let lightbox = use_lightbox(&images);
    let tabs = state.tabs().read().clone();
    let active = state.filter().read().clone();
    let config = state.config().read().clone();

    rsx! {
        section { class: "max-w-6xl mx-auto px-4 py-8",
            h1 { class: "text-3xl min-[600px]:text-5xl font-serif mb-6", "Gallery" }
            div {
                class: "flex gap-2 overflow-x-auto border-b border-stone-800 mb-8",
                role: "tablist",
                aria_label: "Gallery filters",
                for tab in tabs {
                    {
                        let is_active = tab.filter == active;
                        let filter = tab.filter.clone();
                        let tab_class = if is_active {
                            "border-white text-white"
                        } else {
                            "border-transparent text-stone-400 hover:text-white"
                        };
                        rsx! {
                            button {
                                key: "{tab.label}",
                                class: "px-4 py-3 whitespace-nowrap border-b-2 -mb-px transition-colors {tab_class}",
                                role: "tab",
                                aria_selected: "{is_active}",
                                onclick: move |_| state.filter().set(filter.clone()),
                                "{tab.label}"
                            }
                        }
                    }
                }
            }
            GalleryGrid {
                images: images.clone(),
                lightbox,
                timeout_ms: config.load_timeout_ms,
            }
            Lightbox { images, lightbox, config }
        }
    }
}
