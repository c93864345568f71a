//! Thin wrappers over the browser APIs the flows need.
//!
//! On `wasm32` these call into `web_sys`; on native targets they log what
//! the browser would have done so the components still run under desktop
//! renderers and in tests.

use std::time::Duration;

/// Wait for `duration` on the current platform's timer.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Navigate the page to `url`.
pub fn redirect(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to navigate to {}: {:?}", url, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("redirect to {}", url);
}

/// Reload the current page.
pub fn reload() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                tracing::error!("Failed to reload: {:?}", e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("reload requested");
}

/// Blocking `window.alert`.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("alert: {}", message);
}

/// `scheme://host[:port]` of the current page.
pub fn origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
