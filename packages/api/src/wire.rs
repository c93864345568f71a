//! Response envelopes returned by the backend.
//!
//! The welcome endpoint answers `{status, redirect_url | message}`; every
//! other endpoint answers `{ok, ...}`. Fields the backend may omit default
//! to empty so a sparse reply still decodes.

use serde::Deserialize;
use serde_json::Value;
use store::Task;

/// Reply of `POST /api/finalizar_bienvenida`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WelcomeReply {
    pub status: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl WelcomeReply {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Reply of `GET /api/parametro/<name>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub valor: Option<Value>,
}

impl ParameterReply {
    /// The value as text, if the reply is `ok` and the value is non-empty.
    /// Numbers are rendered with their JSON text; `0`, `false`, `""` and
    /// `null` count as no value.
    pub fn value(&self) -> Option<String> {
        if !self.ok {
            return None;
        }
        match self.valor.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

/// Reply of `GET /api/tareas-revision/pendientes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TasksReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub tareas: Vec<Task>,
}

/// Reply of `POST /api/tareas-revision/responder`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RespondReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(json: &str) -> ParameterReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parameter_values() {
        assert_eq!(param(r#"{"ok": true, "valor": "login"}"#).value().as_deref(), Some("login"));
        assert_eq!(param(r#"{"ok": true, "valor": 7}"#).value().as_deref(), Some("7"));
        assert_eq!(param(r#"{"ok": true, "valor": ""}"#).value(), None);
        assert_eq!(param(r#"{"ok": true, "valor": 0}"#).value(), None);
        assert_eq!(param(r#"{"ok": true, "valor": null}"#).value(), None);
        assert_eq!(param(r#"{"ok": true}"#).value(), None);
        assert_eq!(param(r#"{"ok": false, "valor": "login"}"#).value(), None);
        assert_eq!(param(r#"{"valor": "login"}"#).value(), None);
    }

    #[test]
    fn test_welcome_reply() {
        let ok: WelcomeReply = serde_json::from_str(
            r#"{"status": "success", "message": "Registro completado.", "redirect_url": "/consulta"}"#,
        )
        .unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.redirect_url.as_deref(), Some("/consulta"));

        let err: WelcomeReply =
            serde_json::from_str(r#"{"status": "error", "message": "Rol no válido."}"#).unwrap();
        assert!(!err.is_success());
        assert!(err.redirect_url.is_none());
    }

    #[test]
    fn test_sparse_replies() {
        let tasks: TasksReply = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(tasks.ok);
        assert!(tasks.tareas.is_empty());

        let respond: RespondReply = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(!respond.ok);
        assert_eq!(respond.error.as_deref(), Some("boom"));
    }
}
