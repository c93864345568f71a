use dioxus::prelude::*;

use crate::icons::FaUserShield;
use crate::{Icon, ReviewCarousel};

/// Admin landing page. The pending-review modal mounts on top of it.
#[component]
pub fn AdminMenuView(children: Element) -> Element {
    rsx! {
        main {
            class: "page page--admin",
            header {
                class: "page__header",
                Icon { icon: FaUserShield, width: 20, height: 20 }
                h1 { " Menú de Administración" }
            }
            {children}
            ReviewCarousel {}
        }
    }
}
