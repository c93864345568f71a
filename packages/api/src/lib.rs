//! # API crate: typed client for the TucTuc backend
//!
//! The backend is a separate service; this crate only speaks its JSON
//! conventions. Everything the UI needs from the network goes through the
//! [`Backend`] trait so the flows can be exercised against a fake in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], the `reqwest` implementation of [`Backend`] |
//! | [`error`] | [`ApiError`] and the user-facing alert texts derived from it |
//! | [`review`] | Gate evaluation, task loading, and per-task review submission |
//! | [`welcome`] | Posting the finished welcome profile |
//! | [`wire`] | Response envelopes (`{status, ...}`, `{ok, ...}`) |
//!
//! ## Endpoints
//!
//! | Method | Path | Used by |
//! |--------|------|---------|
//! | `POST` | `/api/finalizar_bienvenida` | [`welcome::submit_welcome`] |
//! | `GET` | `/api/parametro/<name>` | [`review::review_due`] |
//! | `GET` | `/api/tareas-revision/pendientes` | [`review::load_review`] |
//! | `POST` | `/api/tareas-revision/responder` | [`review::submit_review`] |

use std::future::Future;

use store::{ReviewResponse, Task, WelcomeSubmission};

pub mod client;
pub mod error;
pub mod review;
pub mod welcome;
pub mod wire;

pub use client::ApiClient;
pub use error::ApiError;

/// Async access to the backend endpoints.
pub trait Backend {
    /// Register the profile; returns the URL to redirect to.
    fn finish_welcome(
        &self,
        body: &WelcomeSubmission,
    ) -> impl Future<Output = Result<String, ApiError>>;

    /// Read a configuration parameter. `Ok(None)` when the backend has no
    /// usable value for it.
    fn parameter(&self, name: &str) -> impl Future<Output = Result<Option<String>, ApiError>>;

    /// Pending price-review tasks, oldest first.
    fn pending_tasks(&self) -> impl Future<Output = Result<Vec<Task>, ApiError>>;

    /// Record the outcome of one review.
    fn respond(&self, body: &ReviewResponse) -> impl Future<Output = Result<(), ApiError>>;
}
