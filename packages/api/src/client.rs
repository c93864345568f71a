use store::{ReviewResponse, Task, WelcomeSubmission};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::wire::{ParameterReply, RespondReply, TasksReply, WelcomeReply};
use crate::Backend;

const DEFAULT_REDIRECT: &str = "/";

/// `reqwest`-backed [`Backend`].
///
/// `base_url` is prepended to every path; on the web it is normally the page
/// origin (e.g. `https://tuctuc.example`) since `reqwest` needs absolute URLs.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read the body and decode it as JSON. A non-2xx status whose body is not
/// JSON becomes [`ApiError::Status`].
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(ApiError::Status {
            code: status.as_u16(),
            body,
        }),
        Err(e) => Err(ApiError::Decode(e)),
    }
}

impl Backend for ApiClient {
    async fn finish_welcome(&self, body: &WelcomeSubmission) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/api/finalizar_bienvenida"))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("finalizar_bienvenida returned {}: {}", status, text);
            return Err(ApiError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        let reply: WelcomeReply = read_json(response).await?;
        if !reply.is_success() {
            return Err(ApiError::rejected(reply.message));
        }
        Ok(reply
            .redirect_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_REDIRECT.to_string()))
    }

    async fn parameter(&self, name: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/parametro/{name}")))
            .send()
            .await?;
        let reply: ParameterReply = read_json(response).await?;
        debug!("parametro {} = {:?}", name, reply.valor);
        Ok(reply.value())
    }

    async fn pending_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/tareas-revision/pendientes"))
            .send()
            .await?;
        let reply: TasksReply = read_json(response).await?;
        if !reply.ok {
            return Ok(Vec::new());
        }
        Ok(reply.tareas)
    }

    async fn respond(&self, body: &ReviewResponse) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/tareas-revision/responder"))
            .json(body)
            .send()
            .await?;
        let reply: RespondReply = read_json(response).await?;
        if reply.ok {
            Ok(())
        } else {
            Err(ApiError::rejected(reply.error))
        }
    }
}
