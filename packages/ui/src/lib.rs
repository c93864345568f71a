//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod browser;

mod client;
pub use client::{make_api, make_store, use_client_config};

pub mod views;

pub const TUCTUC_CSS: Asset = asset!("/assets/tuctuc.css");

mod welcome;
pub use welcome::{WelcomeWizard, DEVICE_COOKIE};

mod review_carousel;
pub use review_carousel::ReviewCarousel;
