//! # Review gate: when to look for pending tasks
//!
//! The backend configures how often admins are prompted with a parameter
//! whose value is one of:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `login` | once per browser session |
//! | `periodico` / `periodic` | when at least N days passed since the last check |
//! | `ambos` / `both` | either of the above |
//!
//! [`ReviewGate`] evaluates both rules against a [`ClientStore`]; fetching
//! the parameters themselves is the caller's job (see the `api` crate).

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ReviewConfig;
use crate::storage::{ClientStore, Scope};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertFrequency {
    Login,
    Periodic,
    Both,
}

impl AlertFrequency {
    pub fn includes_login(self) -> bool {
        matches!(self, AlertFrequency::Login | AlertFrequency::Both)
    }

    pub fn includes_periodic(self) -> bool {
        matches!(self, AlertFrequency::Periodic | AlertFrequency::Both)
    }
}

impl FromStr for AlertFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "login" => Ok(AlertFrequency::Login),
            "periodico" | "periodic" => Ok(AlertFrequency::Periodic),
            "ambos" | "both" => Ok(AlertFrequency::Both),
            other => Err(format!("unknown alert frequency: {other}")),
        }
    }
}

/// Gate rules bound to a store and its configured keys.
pub struct ReviewGate<'a, S: ClientStore> {
    store: &'a S,
    keys: &'a ReviewConfig,
}

impl<'a, S: ClientStore> ReviewGate<'a, S> {
    pub fn new(store: &'a S, keys: &'a ReviewConfig) -> Self {
        Self { store, keys }
    }

    /// Consume this session's login check. Returns `true` the first time it
    /// is called in a session and `false` afterwards.
    pub fn take_login_check(&self) -> bool {
        if self
            .store
            .get(Scope::Session, &self.keys.session_flag_key)
            .is_some()
        {
            return false;
        }
        self.store
            .set(Scope::Session, &self.keys.session_flag_key, "true");
        true
    }

    /// When the task list was last loaded. An unreadable timestamp counts as
    /// never.
    pub fn last_check(&self) -> Option<DateTime<Utc>> {
        let raw = self.store.get(Scope::Local, &self.keys.last_check_key)?;
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the periodic rule fires. Without a previous check it always
    /// fires; otherwise it needs a threshold and at least that many
    /// (fractional) days elapsed.
    pub fn periodic_due(&self, threshold_days: Option<i32>, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_check() else {
            return true;
        };
        let Some(days) = threshold_days else {
            return false;
        };
        let elapsed = (now - last).num_milliseconds() as f64 / MILLIS_PER_DAY;
        elapsed >= f64::from(days)
    }

    /// Remember that tasks were loaded at `now`.
    pub fn record_check(&self, now: DateTime<Utc>) {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.store
            .set(Scope::Local, &self.keys.last_check_key, &stamp);
    }
}
