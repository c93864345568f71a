//! # Client-side key/value storage
//!
//! The review gate and the welcome dialog only need three pieces of browser
//! state: a per-tab session flag, a durable timestamp, and the
//! `dispositivo_id` cookie. [`ClientStore`] abstracts those so the state
//! machines run unchanged against the browser ([`crate::WebStore`], `web`
//! feature on `wasm32`) or against [`crate::MemoryStore`] in tests and on
//! native targets.
//!
//! | Scope | Browser backing | Lifetime |
//! |-------|-----------------|----------|
//! | [`Scope::Session`] | `sessionStorage` | current tab |
//! | [`Scope::Local`] | `localStorage` | across sessions |
//!
//! Cookies are read-only from the client's point of view; the backend issues
//! them.

/// Lifetime of a stored value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Session,
    Local,
}

/// Synchronous key/value access to client-side state.
pub trait ClientStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;
    fn set(&self, scope: Scope, key: &str, value: &str);
    /// Value of cookie `name`, or `None` when absent or empty.
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Extract cookie `name` from a `document.cookie` style header
/// (`"a=1; b=2"`). A name that appears more than once is treated as absent,
/// as is an empty value.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    let haystack = format!("; {header}");
    let needle = format!("; {name}=");
    let mut parts = haystack.split(needle.as_str());
    parts.next();
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    value
        .split(';')
        .next()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
