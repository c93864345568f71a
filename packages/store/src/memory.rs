use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::storage::{ClientStore, Scope};

type Map = Arc<Mutex<HashMap<String, String>>>;

/// In-memory ClientStore for testing and native targets.
///
/// Clones share the same maps, the way every component on a page shares the
/// same browser storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    session: Map,
    local: Map,
    cookies: Map,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to preset a cookie.
    pub fn with_cookie(self, name: &str, value: &str) -> Self {
        lock(&self.cookies).insert(name.to_string(), value.to_string());
        self
    }

    /// Drop session-scoped values, as when the tab is closed and reopened.
    pub fn end_session(&self) {
        lock(&self.session).clear();
    }

    fn map(&self, scope: Scope) -> &Map {
        match scope {
            Scope::Session => &self.session,
            Scope::Local => &self.local,
        }
    }
}

fn lock(map: &Map) -> MutexGuard<'_, HashMap<String, String>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ClientStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        lock(self.map(scope)).get(key).cloned()
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        lock(self.map(scope)).insert(key.to_string(), value.to_string());
    }

    fn cookie(&self, name: &str) -> Option<String> {
        lock(&self.cookies)
            .get(name)
            .filter(|v| !v.is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_are_separate() {
        let store = MemoryStore::new();
        store.set(Scope::Session, "k", "session");
        store.set(Scope::Local, "k", "local");

        assert_eq!(store.get(Scope::Session, "k").as_deref(), Some("session"));
        assert_eq!(store.get(Scope::Local, "k").as_deref(), Some("local"));
    }

    #[test]
    fn test_end_session_keeps_local() {
        let store = MemoryStore::new();
        store.set(Scope::Session, "flag", "true");
        store.set(Scope::Local, "stamp", "2025-01-01T00:00:00Z");

        store.end_session();

        assert!(store.get(Scope::Session, "flag").is_none());
        assert!(store.get(Scope::Local, "stamp").is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new().with_cookie("dispositivo_id", "abc");
        let other = store.clone();
        other.set(Scope::Local, "x", "1");

        assert_eq!(store.get(Scope::Local, "x").as_deref(), Some("1"));
        assert_eq!(other.cookie("dispositivo_id").as_deref(), Some("abc"));
        assert!(store.cookie("nope").is_none());
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let store = MemoryStore::new().with_cookie("dispositivo_id", "");
        assert!(store.cookie("dispositivo_id").is_none());
    }
}
