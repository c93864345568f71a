use dioxus::prelude::*;

use store::ClientConfig;
use views::{AdminMenu, NotFound, Welcome};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/bienvenida?:rol_master")]
    Welcome { rol_master: String },
    #[route("/admin_menu")]
    AdminMenu {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Settings compiled into the bundle.
const CLIENT_TOML: &str = include_str!("../client.toml");

fn load_config() -> ClientConfig {
    match ClientConfig::from_toml(CLIENT_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", ClientConfig::filename(), e);
            ClientConfig::default()
        }
    }
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::TUCTUC_CSS }

        Router::<Route> {}
    }
}
