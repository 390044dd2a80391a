pub mod data;
pub mod pages;

use dioxus::prelude::*;
use pages::{Gallery, Home, NotFound, SiteLayout, Space};

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]
    #[route("/")]
    Home {},
    #[route("/gallery")]
    Gallery {},
    #[route("/spaces/:space")]
    Space { space: String },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    use_context_provider(data::load_gallery);

    rsx! {
        document::Title { "Wilson & Bay" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "min-h-screen bg-stone-950 text-stone-100", Router::<Route> {} }
    }
}
