//! Error type for backend calls and the alert texts shown for them.

use store::ReviewAction;

const UNKNOWN_ERROR: &str = "Error desconocido";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status with a body that is not the expected JSON.
    #[error("server returned status {code}")]
    Status { code: u16, body: String },

    /// The backend answered and refused the operation.
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// The body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn rejected(message: Option<String>) -> Self {
        ApiError::Rejected(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        )
    }

    /// Alert shown when the welcome profile could not be saved. The page is
    /// reloaded after it.
    pub fn welcome_alert(&self) -> String {
        match self {
            ApiError::Status { code, .. } => format!(
                "Error al guardar datos. El servidor devolvió el código {code}."
            ),
            ApiError::Rejected(message) => format!("Error al guardar datos: {message}"),
            ApiError::Http(_) | ApiError::Decode(_) => {
                "Hubo un error de conexión o el servidor no respondió correctamente. Intente de nuevo."
                    .to_string()
            }
        }
    }

    /// Alert shown when a review action failed. The task stays on screen.
    pub fn review_alert(&self, action: ReviewAction) -> String {
        match self {
            ApiError::Rejected(message) => format!("Error: {message}"),
            _ => match action {
                ReviewAction::Confirm => "Error al confirmar precio".to_string(),
                ReviewAction::Update { .. } => "Error al actualizar precio".to_string(),
                ReviewAction::Reject => "Error al rechazar tarea".to_string(),
            },
        }
    }
}
