use dioxus::prelude::*;
use ui::views::AdminMenuView;

#[component]
pub fn AdminMenu() -> Element {
    rsx! {
        AdminMenuView {
            p { class: "page__lead", "Selecciona una opción del menú para continuar." }
        }
    }
}
