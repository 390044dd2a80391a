use crate::Route;
use dioxus::prelude::*;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        section { class: "max-w-xl mx-auto px-4 py-24 text-center",
            h1 { class: "text-3xl font-serif mb-4", "Page not found" }
            p { class: "text-stone-400 mb-8", "Nothing lives at /{path}." }
            Link { class: "underline", to: Route::Home {}, "Back to the home page" }
        }
    }
}
