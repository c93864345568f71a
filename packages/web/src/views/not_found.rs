use dioxus::prelude::*;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        main {
            class: "page",
            h1 { "Página no encontrada" }
            p { "/{path}" }
        }
    }
}
