use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close` unless
/// `close_on_backdrop` is false.
#[component]
pub fn ModalOverlay(
    on_close: EventHandler<()>,
    #[props(default = true)] close_on_backdrop: bool,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| {
                if close_on_backdrop {
                    on_close.call(());
                }
            },
            div {
                class: "modal-card {class}",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}
