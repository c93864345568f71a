//! # Client configuration: `client.toml`
//!
//! Defines the TOML file the web binary embeds at build time. It carries the
//! pacing of the welcome dialog, the browser-storage keys used by the review
//! gate, and the base URL the API client resolves endpoints against.
//!
//! ## Structure
//!
//! ```toml
//! [wizard]
//! greeting_hold_ms = 4500   # "Hola." stays on screen this long
//! intro_hold_ms = 3500
//! prompt_hold_ms = 2000
//! fade_out_ms = 1000
//! hide_ms = 500
//! debounce_ms = 1000        # idle time before a typed name is submitted
//! returning_redirect_ms = 1000
//! returning_redirect_url = "/"
//!
//! [review]
//! session_flag_key = "tareas_verificadas_en_login"
//! last_check_key = "ultima_verificacion_tareas"
//!
//! [api]
//! base_url = ""             # empty = page origin
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`WizardConfig`] | Welcome dialog timings, exposed as [`Duration`]s. |
//! | [`ReviewConfig`] | Storage keys for the once-per-session flag and the last-check timestamp. |
//! | [`ApiConfig`] | Backend base URL. |
//!
//! Every section defaults field by field, so a missing or partial file is
//! equivalent to the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Pacing of the welcome dialog, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub greeting_hold_ms: u64,
    pub intro_hold_ms: u64,
    pub prompt_hold_ms: u64,
    pub fade_out_ms: u64,
    pub hide_ms: u64,
    pub debounce_ms: u64,
    pub returning_redirect_ms: u64,
    pub returning_redirect_url: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            greeting_hold_ms: 4500,
            intro_hold_ms: 3500,
            prompt_hold_ms: 2000,
            fade_out_ms: 1000,
            hide_ms: 500,
            debounce_ms: 1000,
            returning_redirect_ms: 1000,
            returning_redirect_url: "/".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn hide(&self) -> Duration {
        Duration::from_millis(self.hide_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn returning_redirect(&self) -> Duration {
        Duration::from_millis(self.returning_redirect_ms)
    }
}

/// Browser-storage keys used by the review gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Session-scoped flag set once the login check has fired.
    pub session_flag_key: String,
    /// Local-scoped RFC 3339 timestamp of the last successful task load.
    pub last_check_key: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            session_flag_key: "tareas_verificadas_en_login".to_string(),
            last_check_key: "ultima_verificacion_tareas".to_string(),
        }
    }
}

/// Backend location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute origin such as `"https://tuctuc.example"`.
    /// Empty string means the origin of the current page.
    pub base_url: String,
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
