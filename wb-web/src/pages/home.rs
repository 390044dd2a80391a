use crate::data::SPACES;
use crate::Route;
use dioxus::prelude::*;
use wb_common::{GalleryData, SpaceFilter};
use wb_ui::{use_lightbox, GalleryGrid, Lightbox};

/// Thumbnails shown in the featured strip
const FEATURED_COUNT: usize = 5;

#[component]
pub fn Home() -> Element {
    let data: GalleryData = use_context();
    let featured =
        use_hook(|| data.collection().filter_by_space(&SpaceFilter::Space("wilson".into())));
    let lightbox = use_lightbox(&featured);
    let config = data.config.clone();

    rsx! {
        section { class: "h-[80vh] flex flex-col items-center justify-center text-center px-4 bg-gradient-to-b from-stone-800 to-stone-950",
            h1 { class: "text-4xl min-[600px]:text-6xl font-serif mb-4", "Wilson & Bay" }
            p { class: "text-stone-300 max-w-xl", "A historic venue with three distinct spaces for every kind of celebration." }
        }
        section { class: "max-w-6xl mx-auto px-4 py-12",
            h2 { class: "text-2xl font-serif mb-6", "Featured" }
            GalleryGrid {
                images: featured.clone(),
                lightbox,
                limit: FEATURED_COUNT,
                show_all_button: true,
                timeout_ms: config.load_timeout_ms,
            }
            Lightbox { images: featured, lightbox, config }
        }
        section { class: "max-w-6xl mx-auto px-4 py-12",
            h2 { class: "text-2xl font-serif mb-6", "Our spaces" }
            ul { class: "grid gap-4 min-[600px]:grid-cols-3",
                for space in SPACES {
                    li { key: "{space.slug}",
                        Link {
                            class: "block rounded-lg border border-stone-800 p-6 hover:border-stone-600 transition-colors",
                            to: Route::Space {
                                space: space.slug.to_string(),
                            },
                            h3 { class: "text-lg font-serif mb-2", "{space.name}" }
                            p { class: "text-sm text-stone-400", "{space.tagline}" }
                        }
                    }
                }
            }
        }
    }
}
