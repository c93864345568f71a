use dioxus::prelude::*;
use store::Role;

use crate::WelcomeWizard;

/// Full-page layout of the onboarding chat.
#[component]
pub fn WelcomeView(role: Role) -> Element {
    rsx! {
        main {
            class: "page page--welcome",
            div {
                class: "welcome-card",
                div { class: "welcome-card__avatar", "TuC TuC" }
                WelcomeWizard { role }
            }
        }
    }
}
