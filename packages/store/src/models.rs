//! # Domain models for the welcome profile and price-review tasks
//!
//! These types cross the client/backend boundary as JSON, so their serde
//! names follow the backend's field names (`nombre`, `tarea_id`, ...).
//!
//! ## Welcome flow
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | Which account kind is being registered (`"Admin"` or `"Cliente"`). |
//! | [`AgeBracket`] / [`AgeChoice`] | Preset age groups and the "specify exact age" escape hatch. |
//! | [`WeightBracket`] / [`WeightChoice`] | Preset weight ranges and the "specify exact weight" option. |
//! | [`Gender`] | Biological gender categories. |
//! | [`Profile`] | The in-memory accumulator filled by [`crate::Wizard`]. |
//! | [`WelcomeSubmission`] | The body of `POST /api/finalizar_bienvenida`. |
//!
//! ## Review flow
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Task`] | A pending competitor-price review, as listed by the backend. |
//! | [`ReviewAction`] | What the admin decided for the current task. |
//! | [`ReviewResponse`] | The body of `POST /api/tareas-revision/responder`. |

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::format::parse_backend_date;

/// Account role selected through the `rol_master` URL parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    #[serde(rename = "Cliente")]
    Client,
}

impl Role {
    /// Resolve the role from the raw query parameter value.
    /// Anything other than `"Admin"` registers a client.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("Admin") => Role::Admin,
            _ => Role::Client,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Client => "Cliente",
        }
    }
}

/// Preset age groups offered as buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeBracket {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Child,
        AgeBracket::Teen,
        AgeBracket::Adult,
        AgeBracket::Senior,
    ];

    /// Representative age submitted for the bracket.
    pub fn years(self) -> i32 {
        match self {
            AgeBracket::Child => 6,
            AgeBracket::Teen => 15,
            AgeBracket::Adult => 35,
            AgeBracket::Senior => 75,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Child => "Niño (0-12 años)",
            AgeBracket::Teen => "Adolescente (13-17 años)",
            AgeBracket::Adult => "Adulto (18-59 años)",
            AgeBracket::Senior => "Adulto mayor (60+ años)",
        }
    }
}

/// A click in the age button group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgeChoice {
    Bracket(AgeBracket),
    Specify,
}

/// Preset weight ranges offered as buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightBracket {
    Low,
    Normal,
    High,
    VeryHigh,
}

impl WeightBracket {
    pub const ALL: [WeightBracket; 4] = [
        WeightBracket::Low,
        WeightBracket::Normal,
        WeightBracket::High,
        WeightBracket::VeryHigh,
    ];

    /// Representative weight in kilograms submitted for the bracket.
    pub fn kilograms(self) -> f64 {
        match self {
            WeightBracket::Low => 45.0,
            WeightBracket::Normal => 65.0,
            WeightBracket::High => 85.0,
            WeightBracket::VeryHigh => 110.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightBracket::Low => "Menos de 55 kg",
            WeightBracket::Normal => "55 - 75 kg",
            WeightBracket::High => "75 - 95 kg",
            WeightBracket::VeryHigh => "Más de 95 kg",
        }
    }
}

/// A click in the weight button group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightChoice {
    Bracket(WeightBracket),
    Specify,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "MASCULINO")]
    Male,
    #[serde(rename = "FEMENINO")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Masculino",
            Gender::Female => "Femenino",
        }
    }
}

/// Profile collected by the welcome dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub name: String,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub gender: Option<Gender>,
    pub role: Role,
}

/// Body of `POST /api/finalizar_bienvenida`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WelcomeSubmission {
    pub nombre: String,
    pub dispositivo_id: String,
    pub edad: Option<i32>,
    pub peso_aprox: Option<f64>,
    pub genero: Option<Gender>,
    pub rol: Role,
}

impl WelcomeSubmission {
    /// Build the request body. When the `dispositivo_id` cookie is missing a
    /// `BACKUP_<unix-millis>` identifier is generated from `now`.
    pub fn new(profile: &Profile, device_id: Option<String>, now: DateTime<Utc>) -> Self {
        let dispositivo_id = device_id.unwrap_or_else(|| backup_device_id(now));
        Self {
            nombre: profile.name.clone(),
            dispositivo_id,
            edad: profile.age,
            peso_aprox: profile.weight_kg,
            genero: profile.gender,
            rol: profile.role,
        }
    }

    /// Whether the device id was generated client-side.
    pub fn uses_backup_id(&self) -> bool {
        self.dispositivo_id.starts_with("BACKUP_")
    }
}

fn backup_device_id(now: DateTime<Utc>) -> String {
    format!("BACKUP_{}", now.timestamp_millis())
}

/// A pending price-review task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub tarea_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medicamento: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fabricante: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub competidor: String,
    /// Current competitor price. The backend sends either a number or a
    /// numeric string (DECIMAL columns).
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub precio: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fecha_actualizacion: String,
    /// Whole days overdue. Integers, floats (`3.0`) and numeric strings are
    /// accepted; fractions are truncated.
    #[serde(default, deserialize_with = "whole_days")]
    pub dias_vencido: i64,
    #[serde(default)]
    pub url: Option<String>,
}

impl Task {
    pub fn last_updated(&self) -> Option<NaiveDate> {
        parse_backend_date(&self.fecha_actualizacion)
    }

    /// Current price as typed in a number field: `15900`, `8900.5`.
    pub fn price_input_hint(&self) -> String {
        self.precio.to_string()
    }

    /// Link to the original quote, if the backend provided a non-empty one.
    pub fn quote_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => crate::format::parse_leading_float(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {s:?}"))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn whole_days<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Float(n) if n.is_finite() => Ok(n.trunc() as i64),
        Raw::Float(n) => Err(serde::de::Error::custom(format!("invalid day count: {n}"))),
        Raw::Text(s) => crate::format::parse_leading_float(&s)
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid day count: {s:?}"))),
        Raw::Null(()) => Ok(0),
    }
}

/// What the admin decided for a task.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReviewAction {
    /// The current price is still right.
    Confirm,
    /// The price changed to `new_price`.
    Update { new_price: f64 },
    /// The admin is busy; skip the task.
    Reject,
}

impl ReviewAction {
    /// Value of the `accion` field.
    pub fn code(self) -> &'static str {
        match self {
            ReviewAction::Confirm => "completar",
            ReviewAction::Update { .. } => "actualizar",
            ReviewAction::Reject => "rechazar",
        }
    }
}

/// Body of `POST /api/tareas-revision/responder`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub tarea_id: i64,
    pub accion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio_nuevo: Option<f64>,
    pub observaciones: String,
}

impl ReviewResponse {
    pub fn new(task: &Task, action: ReviewAction) -> Self {
        let (precio_nuevo, observaciones) = match action {
            ReviewAction::Confirm => (None, "Precio confirmado sin cambios".to_string()),
            ReviewAction::Update { new_price } => (
                Some(new_price),
                format!("Precio actualizado de ${} a ${}", task.precio, new_price),
            ),
            ReviewAction::Reject => (
                None,
                "Admin rechazó la tarea (ocupado con otras tareas)".to_string(),
            ),
        };
        Self {
            tarea_id: task.tarea_id,
            accion: action.code().to_string(),
            precio_nuevo,
            observaciones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task() -> Task {
        Task {
            tarea_id: 7,
            medicamento: "Acetaminofén 500 mg".to_string(),
            fabricante: "Genfar".to_string(),
            competidor: "Cruz Verde".to_string(),
            precio: 12500.0,
            fecha_actualizacion: "2025-10-01".to_string(),
            dias_vencido: 16,
            url: None,
        }
    }

    #[test]
    fn test_role_from_query() {
        assert_eq!(Role::from_query(Some("Admin")), Role::Admin);
        assert_eq!(Role::from_query(Some("Cliente")), Role::Client);
        assert_eq!(Role::from_query(Some("admin")), Role::Client);
        assert_eq!(Role::from_query(None), Role::Client);
        assert_eq!(serde_json::to_value(Role::Client).unwrap(), "Cliente");
    }

    #[test]
    fn test_bracket_values() {
        let ages: Vec<i32> = AgeBracket::ALL.iter().map(|b| b.years()).collect();
        assert_eq!(ages, vec![6, 15, 35, 75]);
        let weights: Vec<f64> = WeightBracket::ALL.iter().map(|b| b.kilograms()).collect();
        assert_eq!(weights, vec![45.0, 65.0, 85.0, 110.0]);
        assert_eq!(serde_json::to_value(WeightBracket::VeryHigh).unwrap(), "VERY_HIGH");
    }

    #[test]
    fn test_submission_backup_id() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let profile = Profile {
            name: "Ana".to_string(),
            ..Profile::default()
        };

        let with_cookie = WelcomeSubmission::new(&profile, Some("dev-1".to_string()), now);
        assert_eq!(with_cookie.dispositivo_id, "dev-1");
        assert!(!with_cookie.uses_backup_id());

        let without = WelcomeSubmission::new(&profile, None, now);
        assert_eq!(without.dispositivo_id, format!("BACKUP_{}", now.timestamp_millis()));
        assert!(without.uses_backup_id());
    }

    #[test]
    fn test_submission_json_shape() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let profile = Profile {
            name: "Luis".to_string(),
            age: Some(35),
            weight_kg: None,
            gender: Some(Gender::Male),
            role: Role::Client,
        };
        let body = serde_json::to_value(WelcomeSubmission::new(&profile, Some("d".into()), now))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "nombre": "Luis",
                "dispositivo_id": "d",
                "edad": 35,
                "peso_aprox": null,
                "genero": "MASCULINO",
                "rol": "Cliente",
            })
        );
    }

    #[test]
    fn test_task_price_as_string_or_number() {
        let from_string: Task = serde_json::from_value(serde_json::json!({
            "tarea_id": 1,
            "medicamento": "Ibuprofeno",
            "fabricante": "MK",
            "competidor": "Locatel",
            "precio": "8900.50",
            "fecha_actualizacion": "2025-09-30 10:00:00",
            "dias_vencido": 17,
        }))
        .unwrap();
        assert_eq!(from_string.precio, 8900.5);
        assert!(from_string.url.is_none());
        assert_eq!(from_string.last_updated(), NaiveDate::from_ymd_opt(2025, 9, 30));

        let from_number: Task = serde_json::from_value(serde_json::json!({
            "tarea_id": 2,
            "medicamento": "Loratadina",
            "fabricante": "La Santé",
            "competidor": "Cruz Verde",
            "precio": 4200,
            "fecha_actualizacion": "2025-09-30",
            "dias_vencido": 3,
            "url": "",
        }))
        .unwrap();
        assert_eq!(from_number.precio, 4200.0);
        assert!(from_number.quote_url().is_none());

        let bad: Result<Task, _> = serde_json::from_value(serde_json::json!({
            "tarea_id": 3,
            "medicamento": "x",
            "fabricante": "y",
            "competidor": "z",
            "precio": "n/a",
            "fecha_actualizacion": "",
            "dias_vencido": 0,
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_task_list_tolerates_nulls_and_float_days() {
        let tasks: Vec<Task> = serde_json::from_value(serde_json::json!([
            {
                "tarea_id": 1,
                "medicamento": "Ibuprofeno",
                "fabricante": "MK",
                "competidor": "Locatel",
                "precio": 8900,
                "fecha_actualizacion": "2025-09-30",
                "dias_vencido": 17,
            },
            {
                "tarea_id": 2,
                "medicamento": "Loratadina",
                "fabricante": null,
                "competidor": "Cruz Verde",
                "precio": "4200.00",
                "fecha_actualizacion": null,
                "dias_vencido": 3.0,
            },
            {
                "tarea_id": 3,
                "medicamento": "Omeprazol",
                "competidor": "Farmatodo",
                "precio": 7100,
                "fecha_actualizacion": "2025-09-01",
                "dias_vencido": "45",
            },
        ]))
        .unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].dias_vencido, 17);
        assert_eq!(tasks[1].fabricante, "");
        assert_eq!(tasks[1].fecha_actualizacion, "");
        assert_eq!(tasks[1].dias_vencido, 3);
        assert!(tasks[1].last_updated().is_none());
        assert_eq!(tasks[2].fabricante, "");
        assert_eq!(tasks[2].dias_vencido, 45);
    }

    #[test]
    fn test_price_input_hint_matches_current_price() {
        let mut t = task();
        assert_eq!(t.price_input_hint(), "12500");
        t.precio = 8900.5;
        assert_eq!(t.price_input_hint(), "8900.5");
    }

    #[test]
    fn test_review_response_bodies() {
        let t = task();

        let confirm = serde_json::to_value(ReviewResponse::new(&t, ReviewAction::Confirm)).unwrap();
        assert_eq!(
            confirm,
            serde_json::json!({
                "tarea_id": 7,
                "accion": "completar",
                "observaciones": "Precio confirmado sin cambios",
            })
        );

        let update = ReviewResponse::new(&t, ReviewAction::Update { new_price: 13000.5 });
        assert_eq!(update.accion, "actualizar");
        assert_eq!(update.precio_nuevo, Some(13000.5));
        assert_eq!(update.observaciones, "Precio actualizado de $12500 a $13000.5");

        let reject = ReviewResponse::new(&t, ReviewAction::Reject);
        assert_eq!(reject.accion, "rechazar");
        assert!(reject.precio_nuevo.is_none());
    }
}
