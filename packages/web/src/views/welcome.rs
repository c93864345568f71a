use dioxus::prelude::*;
use store::Role;
use ui::views::WelcomeView;

/// `/bienvenida?rol_master=...`
#[component]
pub fn Welcome(rol_master: String) -> Element {
    let role = Role::from_query(Some(rol_master.as_str()));
    tracing::debug!("welcome page for role {}", role.as_str());

    rsx! {
        WelcomeView { role }
    }
}
