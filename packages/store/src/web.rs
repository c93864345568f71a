//! # Browser storage: `sessionStorage`, `localStorage`, `document.cookie`
//!
//! [`WebStore`] is the [`ClientStore`] implementation used on the **web
//! platform**. It is a zero-size handle that looks up the `Window` on every
//! call, so it can be cloned freely into event handlers and async tasks.
//!
//! ## Error handling
//!
//! All trait methods silently swallow errors (returning `None` for reads,
//! doing nothing for writes). Storage can be disabled by the browser (private
//! mode, quota, sandboxed iframes); that degrades to "nothing stored", which
//! the review gate treats as a first visit.

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

use crate::storage::{parse_cookie, ClientStore, Scope};

/// Browser-backed ClientStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStore;

impl WebStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(scope: Scope) -> Option<Storage> {
        let window = web_sys::window()?;
        let storage = match scope {
            Scope::Session => window.session_storage(),
            Scope::Local => window.local_storage(),
        };
        storage.ok().flatten()
    }

    fn cookie_header() -> Option<String> {
        let document = web_sys::window()?.document()?;
        let html = document.dyn_into::<HtmlDocument>().ok()?;
        html.cookie().ok()
    }
}

impl ClientStore for WebStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        Self::storage(scope)?.get_item(key).ok().flatten()
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        let Some(storage) = Self::storage(scope) else {
            return;
        };
        let _ = storage.set_item(key, value);
    }

    fn cookie(&self, name: &str) -> Option<String> {
        parse_cookie(&Self::cookie_header()?, name)
    }
}
