//! Shared constructors for the platform store and the backend client.
//!
//! - **Web** (WASM + `web` feature): browser storage via [`store::WebStore`]
//! - **Native**: a process-wide [`store::MemoryStore`]

use api::ApiClient;
use dioxus::prelude::*;
use store::ClientConfig;

use crate::browser;

/// Backend used when neither the config nor the page supply an origin.
const FALLBACK_BASE_URL: &str = "http://localhost:5000";

/// Create the platform-appropriate client store.
pub fn make_store() -> impl store::ClientStore + Clone + 'static {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::WebStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        static STORE: std::sync::OnceLock<store::MemoryStore> = std::sync::OnceLock::new();
        STORE.get_or_init(store::MemoryStore::new).clone()
    }
}

/// Create a backend client for `config.api.base_url`, or the page origin
/// when that is empty.
pub fn make_api(config: &ClientConfig) -> ApiClient {
    let base = config.api.base_url.trim();
    if !base.is_empty() {
        return ApiClient::new(base);
    }
    match browser::origin() {
        Some(origin) => ApiClient::new(origin),
        None => {
            tracing::warn!("No api.base_url and no page origin, using {}", FALLBACK_BASE_URL);
            ApiClient::new(FALLBACK_BASE_URL)
        }
    }
}

/// The client configuration provided by the app root.
pub fn use_client_config() -> ClientConfig {
    try_use_context::<ClientConfig>().unwrap_or_default()
}
