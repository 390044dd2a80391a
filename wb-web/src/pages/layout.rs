use crate::data::SPACES;
use crate::Route;
use dioxus::prelude::*;
use wb_common::{GalleryData, ScrollPolicy};
use wb_ui::{MenuIcon, ScrollToTop, XIcon};

fn nav_links() -> Vec<(&'static str, Route)> {
    let mut links = vec![("Home", Route::Home {}), ("Gallery", Route::Gallery {})];
    links.extend(SPACES.iter().map(|space| {
        (
            space.name,
            Route::Space {
                space: space.slug.to_string(),
            },
        )
    }));
    links
}

#[component]
pub fn SiteLayout() -> Element {
    let current_route = use_route::<Route>();
    let data: GalleryData = use_context();
    let mut drawer_open = use_signal(|| false);

    let path = current_route.to_string();
    let policy = ScrollPolicy::from_config(&data.config);
    // Home has a hero under a transparent header; other pages start below it
    let is_home = matches!(current_route, Route::Home {});
    let header_bg = if is_home {
        "bg-transparent"
    } else {
        "bg-stone-950/95 backdrop-blur border-b border-stone-800"
    };
    let main_padding = if is_home { "" } else { "pt-14 min-[600px]:pt-16" };

    rsx! {
        ScrollToTop { path, policy }
        header { class: "fixed top-0 inset-x-0 z-40 h-14 min-[600px]:h-16 flex items-center justify-between px-4 {header_bg}",
            Link {
                class: "font-serif text-xl tracking-wide",
                to: Route::Home {},
                "Wilson & Bay"
            }
            nav { class: "hidden min-[600px]:flex items-center gap-6 text-sm",
                for (label , route) in nav_links() {
                    Link {
                        key: "{route}",
                        class: if route == current_route { "text-white" } else { "text-stone-400 hover:text-white" },
                        to: route.clone(),
                        "{label}"
                    }
                }
            }
            button {
                class: "min-[600px]:hidden p-2 text-stone-200",
                aria_label: if drawer_open() { "Close menu" } else { "Open menu" },
                aria_expanded: "{drawer_open()}",
                onclick: move |_| drawer_open.toggle(),
                if drawer_open() {
                    XIcon { class: "w-6 h-6" }
                } else {
                    MenuIcon { class: "w-6 h-6" }
                }
            }
        }
        if drawer_open() {
            nav { class: "fixed top-14 inset-x-0 z-30 flex flex-col bg-stone-950 border-b border-stone-800 min-[600px]:hidden",
                for (label , route) in nav_links() {
                    Link {
                        key: "{route}",
                        class: "px-6 py-4 text-stone-200 hover:bg-stone-900",
                        to: route,
                        onclick: move |_| drawer_open.set(false),
                        "{label}"
                    }
                }
            }
        }
        main { class: "{main_padding}", Outlet::<Route> {} }
        footer { class: "mt-16 border-t border-stone-800 px-4 py-8 text-center text-sm text-stone-500",
            p { "Wilson & Bay · Weddings, parties and gatherings" }
        }
    }
}
