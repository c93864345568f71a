use chrono::{DateTime, Utc};
use store::{Profile, WelcomeSubmission};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::Backend;

/// Send the finished profile and return the URL to continue to.
///
/// A missing `dispositivo_id` cookie is replaced by a `BACKUP_<millis>`
/// identifier derived from `now`.
pub async fn submit_welcome<B: Backend>(
    backend: &B,
    profile: &Profile,
    device_id: Option<String>,
    now: DateTime<Utc>,
) -> Result<String, ApiError> {
    let body = WelcomeSubmission::new(profile, device_id, now);
    if body.uses_backup_id() {
        warn!("dispositivo_id cookie missing, using {}", body.dispositivo_id);
    }
    let redirect = backend.finish_welcome(&body).await?;
    info!("welcome saved for {} ({})", body.nombre, body.rol.as_str());
    Ok(redirect)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;
    use store::{Gender, ReviewResponse, Role, Task};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        bodies: RefCell<Vec<WelcomeSubmission>>,
        reply: Option<String>,
    }

    impl Backend for Recorder {
        async fn finish_welcome(&self, body: &WelcomeSubmission) -> Result<String, ApiError> {
            self.bodies.borrow_mut().push(body.clone());
            match &self.reply {
                Some(url) => Ok(url.clone()),
                None => Err(ApiError::Rejected("Rol no válido.".to_string())),
            }
        }

        async fn parameter(&self, _name: &str) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn pending_tasks(&self) -> Result<Vec<Task>, ApiError> {
            Ok(Vec::new())
        }

        async fn respond(&self, _body: &ReviewResponse) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn profile() -> Profile {
        Profile {
            name: "Marta".to_string(),
            age: Some(75),
            weight_kg: Some(65.0),
            gender: Some(Gender::Female),
            role: Role::Client,
        }
    }

    #[tokio::test]
    async fn test_submit_returns_redirect() {
        let backend = Recorder {
            reply: Some("/consulta".to_string()),
            ..Recorder::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 10, 17, 8, 30, 0).unwrap();

        let url = submit_welcome(&backend, &profile(), Some("abc".into()), now)
            .await
            .unwrap();

        assert_eq!(url, "/consulta");
        let bodies = backend.bodies.borrow();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].dispositivo_id, "abc");
        assert_eq!(bodies[0].edad, Some(75));
        assert_eq!(bodies[0].genero, Some(Gender::Female));
    }

    #[tokio::test]
    async fn test_submit_without_cookie_uses_backup_id() {
        let backend = Recorder {
            reply: Some("/".to_string()),
            ..Recorder::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 10, 17, 8, 30, 0).unwrap();

        submit_welcome(&backend, &profile(), None, now).await.unwrap();

        let bodies = backend.bodies.borrow();
        assert_eq!(
            bodies[0].dispositivo_id,
            format!("BACKUP_{}", now.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_rejection_surfaces_message() {
        let backend = Recorder::default();
        let err = submit_welcome(&backend, &profile(), None, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.welcome_alert(), "Error al guardar datos: Rol no válido.");
    }
}
