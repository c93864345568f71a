//! # Price-review flow
//!
//! 1. [`review_due`] asks the backend how often admins should be prompted
//!    and evaluates the [`ReviewGate`] rules.
//! 2. [`load_review`] fetches the pending tasks and, when there are any,
//!    records the check time.
//! 3. [`submit_review`] posts one decision and advances the carousel only
//!    when the backend accepted it.

use chrono::{DateTime, Utc};
use store::format::parse_leading_int;
use store::{
    AlertFrequency, CarouselStep, ClientStore, ReviewAction, ReviewGate, ReviewResponse,
    TaskCarousel,
};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::Backend;

/// Parameter holding the alert frequency (`login`, `periodico`, `ambos`).
pub const FREQUENCY_PARAM: &str = "frecuencia_alerta_cotizaciones";
/// Parameter holding the periodic threshold in days.
pub const PERIODIC_DAYS_PARAM: &str = "dias_alerta_periodica_cotizaciones";

/// Whether the pending tasks should be looked up now. Any backend failure
/// closes the gate.
pub async fn review_due<B: Backend, S: ClientStore>(
    backend: &B,
    gate: &ReviewGate<'_, S>,
    now: DateTime<Utc>,
) -> bool {
    match evaluate_gate(backend, gate, now).await {
        Ok(due) => due,
        Err(e) => {
            error!("review gate check failed: {}", e);
            false
        }
    }
}

async fn evaluate_gate<B: Backend, S: ClientStore>(
    backend: &B,
    gate: &ReviewGate<'_, S>,
    now: DateTime<Utc>,
) -> Result<bool, ApiError> {
    let Some(raw) = backend.parameter(FREQUENCY_PARAM).await? else {
        return Ok(false);
    };
    let frequency: AlertFrequency = match raw.parse() {
        Ok(f) => f,
        Err(e) => {
            warn!("{}", e);
            return Ok(false);
        }
    };

    if frequency.includes_login() && gate.take_login_check() {
        debug!("review gate open: first check this session");
        return Ok(true);
    }

    if frequency.includes_periodic() {
        let Some(days) = backend.parameter(PERIODIC_DAYS_PARAM).await? else {
            return Ok(false);
        };
        let due = gate.periodic_due(parse_leading_int(&days), now);
        debug!("review gate periodic ({} days): {}", days, due);
        return Ok(due);
    }

    Ok(false)
}

/// Load the pending tasks. Returns `None` when there is nothing to show or
/// the request failed.
pub async fn load_review<B: Backend, S: ClientStore>(
    backend: &B,
    gate: &ReviewGate<'_, S>,
    now: DateTime<Utc>,
) -> Option<TaskCarousel> {
    let tasks = match backend.pending_tasks().await {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("failed to load pending review tasks: {}", e);
            return None;
        }
    };
    if tasks.is_empty() {
        return None;
    }
    info!("{} pending review tasks", tasks.len());
    gate.record_check(now);
    Some(TaskCarousel::new(tasks))
}

/// Post `action` for the current task. The carousel only moves when the
/// backend accepted the response.
pub async fn submit_review<B: Backend>(
    backend: &B,
    carousel: &mut TaskCarousel,
    action: ReviewAction,
) -> Result<CarouselStep, ApiError> {
    let Some(task) = carousel.current() else {
        return Ok(CarouselStep::Finished);
    };
    let body = ReviewResponse::new(task, action);
    backend.respond(&body).await?;
    debug!("task {} answered with {}", body.tarea_id, body.accion);
    Ok(carousel.advance())
}
