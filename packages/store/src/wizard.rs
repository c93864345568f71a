//! # Welcome dialog state machine
//!
//! [`Wizard`] owns the step sequence of the onboarding chat and the
//! [`Profile`] it accumulates. It knows nothing about timers or rendering:
//! the UI feeds it [`WizardInput`]s and reads back what to show through
//! [`Wizard::dialog`] and [`Wizard::panel`].
//!
//! ## Steps
//!
//! ```text
//! Greeting → AskName → ConfirmName ─(no)→ AskName
//!                          │
//!                        (yes)
//!              ┌───────────┴────────────┐
//!            Admin                    Client
//!              │                        │
//!              │             AskAge ⇄ AskExactAge
//!              │                        │
//!              │          AskWeight ⇄ AskExactWeight
//!              │                        │
//!              │                    AskGender
//!              └──────────→ Submitting ←┘
//! ```
//!
//! A wizard started for a device that already carries a `dispositivo_id`
//! cookie begins (and stays) in [`WizardStep::Returning`].

use std::time::Duration;

use crate::config::WizardConfig;
use crate::format::{parse_leading_float, parse_leading_int};
use crate::models::{AgeChoice, Gender, Profile, Role, WeightChoice};

/// Where the conversation currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Greeting,
    AskName,
    ConfirmName,
    AskAge,
    AskExactAge,
    AskWeight,
    AskExactWeight,
    AskGender,
    Submitting,
    Returning,
}

/// An event coming from the page.
#[derive(Clone, Debug, PartialEq)]
pub enum WizardInput {
    /// The greeting script finished playing.
    GreetingDone,
    /// A name was submitted (Enter or idle debounce).
    Name(String),
    /// Answer to `¿Tu nombre es "..."?`.
    ConfirmName(bool),
    Age(AgeChoice),
    /// Raw text of the exact-age field, submitted with Enter.
    ExactAge(String),
    Weight(WeightChoice),
    /// Raw text of the exact-weight field, submitted with Enter.
    ExactWeight(String),
    Gender(Gender),
}

impl WizardInput {
    fn kind(&self) -> &'static str {
        match self {
            WizardInput::GreetingDone => "greeting-done",
            WizardInput::Name(_) => "name",
            WizardInput::ConfirmName(_) => "confirm-name",
            WizardInput::Age(_) => "age",
            WizardInput::ExactAge(_) => "exact-age",
            WizardInput::Weight(_) => "weight",
            WizardInput::ExactWeight(_) => "exact-weight",
            WizardInput::Gender(_) => "gender",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("{input} input is not accepted at step {step:?}")]
    Unexpected {
        step: WizardStep,
        input: &'static str,
    },
    #[error("name must not be empty")]
    EmptyName,
}

/// Which control is revealed under the dialog bubble.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    None,
    TextInput(InputSpec),
    Confirmation,
    AgeOptions,
    WeightOptions,
    GenderOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
}

/// Attributes for the shared text field.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSpec {
    pub kind: InputKind,
    pub placeholder: &'static str,
    pub max_length: Option<u32>,
    pub step: Option<&'static str>,
    pub max: Option<&'static str>,
}

/// One line of the scripted greeting: shown, held, then faded out.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogLine {
    pub text: &'static str,
    pub hold: Duration,
}

/// The greeting played before asking for the name.
pub fn greeting_script(role: Role, timing: &WizardConfig) -> Vec<DialogLine> {
    let ask_name = if role.is_admin() {
        "Para configurar tu cuenta de administrador, por favor, dime tu nombre."
    } else {
        "Por favor, dime tu nombre."
    };
    vec![
        DialogLine {
            text: "Hola.",
            hold: Duration::from_millis(timing.greeting_hold_ms),
        },
        DialogLine {
            text: "Soy TuC TuC. Estoy aquí para ayudarte.",
            hold: Duration::from_millis(timing.intro_hold_ms),
        },
        DialogLine {
            text: ask_name,
            hold: Duration::from_millis(timing.prompt_hold_ms),
        },
    ]
}

/// What a key-up in the name field should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameKey {
    /// Enter on a non-empty value: submit right away.
    Submit(String),
    /// Arm the idle timer; submit this value if nothing else is typed.
    Debounce(String),
    /// The field is blank: hide the confirmation and wait.
    Clear,
}

/// Classify a key-up in the name field. `value` is the raw field content.
pub fn name_key(value: &str, enter: bool) -> NameKey {
    let name = value.trim();
    if name.is_empty() {
        NameKey::Clear
    } else if enter {
        NameKey::Submit(name.to_string())
    } else {
        NameKey::Debounce(name.to_string())
    }
}

/// Idle timer for the name field. Each key-up or step change invalidates
/// every timer armed before it, so only the latest one may fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameTimer {
    generation: u64,
}

impl NameTimer {
    /// Invalidate pending timers and return the ticket for a new one.
    pub fn arm(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    /// Invalidate pending timers without arming a new one.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether the timer holding `ticket` may still fire.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

/// The onboarding conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct Wizard {
    step: WizardStep,
    profile: Profile,
}

impl Wizard {
    /// Start a conversation. A device that already has a `dispositivo_id`
    /// cookie skips straight to [`WizardStep::Returning`].
    pub fn start(role: Role, device_id: Option<&str>) -> Self {
        let step = match device_id {
            Some(_) => WizardStep::Returning,
            None => WizardStep::Greeting,
        };
        Self {
            step,
            profile: Profile {
                role,
                ..Profile::default()
            },
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }

    /// The profile is complete and should be posted.
    pub fn is_ready_to_submit(&self) -> bool {
        self.step == WizardStep::Submitting
    }

    /// Value to pre-fill the name field with (the last rejected name).
    pub fn name_prefill(&self) -> &str {
        &self.profile.name
    }

    /// Advance the conversation.
    pub fn apply(&mut self, input: WizardInput) -> Result<WizardStep, WizardError> {
        use WizardStep::*;

        let next = match (self.step, input) {
            (Greeting, WizardInput::GreetingDone) => AskName,
            (AskName, WizardInput::Name(name)) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(WizardError::EmptyName);
                }
                self.profile.name = name.to_string();
                ConfirmName
            }
            (ConfirmName, WizardInput::ConfirmName(true)) => {
                if self.profile.role.is_admin() {
                    Submitting
                } else {
                    AskAge
                }
            }
            (ConfirmName, WizardInput::ConfirmName(false)) => AskName,
            (AskAge, WizardInput::Age(AgeChoice::Specify)) => AskExactAge,
            (AskAge, WizardInput::Age(AgeChoice::Bracket(bracket))) => {
                self.profile.age = Some(bracket.years());
                AskWeight
            }
            (AskExactAge, WizardInput::ExactAge(raw)) => {
                self.profile.age = parse_leading_int(&raw);
                AskWeight
            }
            (AskWeight, WizardInput::Weight(WeightChoice::Specify)) => AskExactWeight,
            (AskWeight, WizardInput::Weight(WeightChoice::Bracket(bracket))) => {
                self.profile.weight_kg = Some(bracket.kilograms());
                AskGender
            }
            (AskExactWeight, WizardInput::ExactWeight(raw)) => {
                self.profile.weight_kg = parse_leading_float(&raw);
                AskGender
            }
            (AskGender, WizardInput::Gender(gender)) => {
                self.profile.gender = Some(gender);
                Submitting
            }
            (step, input) => {
                return Err(WizardError::Unexpected {
                    step,
                    input: input.kind(),
                })
            }
        };

        self.step = next;
        Ok(next)
    }

    /// Text of the dialog bubble for the current step. `None` means the
    /// bubble keeps whatever it last showed.
    pub fn dialog(&self) -> Option<String> {
        let name = &self.profile.name;
        match self.step {
            WizardStep::Greeting | WizardStep::AskName | WizardStep::ConfirmName => None,
            WizardStep::AskAge => Some(format!(
                "{name}, ¿en cuál de estos grupos te encuentras según tu edad?"
            )),
            WizardStep::AskExactAge => {
                Some("Por favor, escribe tu edad exacta en años.".to_string())
            }
            WizardStep::AskWeight => Some(format!(
                "De acuerdo, {name}. ¿Cuál es tu rango de peso? Esto ayuda con la dosificación."
            )),
            WizardStep::AskExactWeight => {
                Some("Por favor, escribe tu peso exacto en kilogramos (Ej: 75.5).".to_string())
            }
            WizardStep::AskGender => Some(format!(
                "{name}, ¿cuál de estas opciones describe mejor tu género biológico?"
            )),
            WizardStep::Submitting => Some(format!("¡Perfecto, {name}! Guardando tus datos...")),
            WizardStep::Returning => Some(
                "¡Bienvenido de vuelta! Redirigiendo para verificación de rol...".to_string(),
            ),
        }
    }

    /// `¿Tu nombre es "..."?` while confirming.
    pub fn confirmation_text(&self) -> Option<String> {
        (self.step == WizardStep::ConfirmName)
            .then(|| format!("¿Tu nombre es \"{}\"?", self.profile.name))
    }

    /// The control shown for the current step.
    pub fn panel(&self) -> Panel {
        match self.step {
            WizardStep::AskName => Panel::TextInput(InputSpec {
                kind: InputKind::Text,
                placeholder: "Escribe aquí...",
                max_length: Some(50),
                step: None,
                max: None,
            }),
            WizardStep::ConfirmName => Panel::Confirmation,
            WizardStep::AskAge => Panel::AgeOptions,
            WizardStep::AskExactAge => Panel::TextInput(InputSpec {
                kind: InputKind::Number,
                placeholder: "Ej: 35",
                max_length: Some(3),
                step: None,
                max: None,
            }),
            WizardStep::AskWeight => Panel::WeightOptions,
            WizardStep::AskExactWeight => Panel::TextInput(InputSpec {
                kind: InputKind::Number,
                placeholder: "Ej: 75.5",
                max_length: None,
                step: Some("0.1"),
                max: Some("500"),
            }),
            WizardStep::AskGender => Panel::GenderOptions,
            WizardStep::Greeting | WizardStep::Submitting | WizardStep::Returning => Panel::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeBracket, WeightBracket};

    fn named(role: Role, name: &str) -> Wizard {
        let mut wizard = Wizard::start(role, None);
        wizard.apply(WizardInput::GreetingDone).unwrap();
        wizard.apply(WizardInput::Name(name.to_string())).unwrap();
        wizard
    }

    #[test]
    fn test_client_visits_age_weight_gender() {
        let mut wizard = named(Role::Client, "  Marta ");
        assert_eq!(wizard.profile().name, "Marta");

        let mut visited = vec![wizard.apply(WizardInput::ConfirmName(true)).unwrap()];
        visited.push(
            wizard
                .apply(WizardInput::Age(AgeChoice::Bracket(AgeBracket::Adult)))
                .unwrap(),
        );
        visited.push(
            wizard
                .apply(WizardInput::Weight(WeightChoice::Bracket(WeightBracket::High)))
                .unwrap(),
        );
        visited.push(wizard.apply(WizardInput::Gender(Gender::Female)).unwrap());

        assert_eq!(
            visited,
            vec![
                WizardStep::AskAge,
                WizardStep::AskWeight,
                WizardStep::AskGender,
                WizardStep::Submitting,
            ]
        );
        assert!(wizard.is_ready_to_submit());
        let profile = wizard.profile();
        assert_eq!(profile.age, Some(35));
        assert_eq!(profile.weight_kg, Some(85.0));
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.role, Role::Client);
    }

    #[test]
    fn test_admin_skips_to_submission() {
        let mut wizard = named(Role::Admin, "Root");
        assert_eq!(
            wizard.apply(WizardInput::ConfirmName(true)).unwrap(),
            WizardStep::Submitting
        );
        let profile = wizard.profile();
        assert!(profile.age.is_none());
        assert!(profile.weight_kg.is_none());
        assert!(profile.gender.is_none());

        // No further questions are accepted.
        assert!(wizard
            .apply(WizardInput::Age(AgeChoice::Bracket(AgeBracket::Teen)))
            .is_err());
    }

    #[test]
    fn test_age_brackets() {
        for (bracket, years) in [
            (AgeBracket::Child, 6),
            (AgeBracket::Teen, 15),
            (AgeBracket::Adult, 35),
            (AgeBracket::Senior, 75),
        ] {
            let mut wizard = named(Role::Client, "Ana");
            wizard.apply(WizardInput::ConfirmName(true)).unwrap();
            wizard.apply(WizardInput::Age(AgeChoice::Bracket(bracket))).unwrap();
            assert_eq!(wizard.profile().age, Some(years));
        }
    }

    #[test]
    fn test_weight_brackets() {
        for (bracket, kg) in [
            (WeightBracket::Low, 45.0),
            (WeightBracket::Normal, 65.0),
            (WeightBracket::High, 85.0),
            (WeightBracket::VeryHigh, 110.0),
        ] {
            let mut wizard = named(Role::Client, "Ana");
            wizard.apply(WizardInput::ConfirmName(true)).unwrap();
            wizard
                .apply(WizardInput::Age(AgeChoice::Bracket(AgeBracket::Adult)))
                .unwrap();
            wizard.apply(WizardInput::Weight(WeightChoice::Bracket(bracket))).unwrap();
            assert_eq!(wizard.profile().weight_kg, Some(kg));
        }
    }

    #[test]
    fn test_invalid_exact_values_become_none() {
        let mut wizard = named(Role::Client, "Ana");
        wizard.apply(WizardInput::ConfirmName(true)).unwrap();
        assert_eq!(
            wizard.apply(WizardInput::Age(AgeChoice::Specify)).unwrap(),
            WizardStep::AskExactAge
        );
        assert_eq!(
            wizard.apply(WizardInput::ExactAge("treinta".into())).unwrap(),
            WizardStep::AskWeight
        );
        assert_eq!(
            wizard.apply(WizardInput::Weight(WeightChoice::Specify)).unwrap(),
            WizardStep::AskExactWeight
        );
        assert_eq!(
            wizard.apply(WizardInput::ExactWeight("".into())).unwrap(),
            WizardStep::AskGender
        );

        assert!(wizard.profile().age.is_none());
        assert!(wizard.profile().weight_kg.is_none());
    }

    #[test]
    fn test_valid_exact_values() {
        let mut wizard = named(Role::Client, "Ana");
        wizard.apply(WizardInput::ConfirmName(true)).unwrap();
        wizard.apply(WizardInput::Age(AgeChoice::Specify)).unwrap();
        wizard.apply(WizardInput::ExactAge("42".into())).unwrap();
        wizard.apply(WizardInput::Weight(WeightChoice::Specify)).unwrap();
        wizard.apply(WizardInput::ExactWeight("75.5".into())).unwrap();

        assert_eq!(wizard.profile().age, Some(42));
        assert_eq!(wizard.profile().weight_kg, Some(75.5));
    }

    #[test]
    fn test_rejected_name_is_prefilled() {
        let mut wizard = named(Role::Client, "Jhon");
        assert_eq!(
            wizard.confirmation_text().as_deref(),
            Some("¿Tu nombre es \"Jhon\"?")
        );

        assert_eq!(
            wizard.apply(WizardInput::ConfirmName(false)).unwrap(),
            WizardStep::AskName
        );
        assert_eq!(wizard.name_prefill(), "Jhon");
        assert!(matches!(wizard.panel(), Panel::TextInput(_)));

        wizard.apply(WizardInput::Name("John".into())).unwrap();
        assert_eq!(wizard.profile().name, "John");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut wizard = Wizard::start(Role::Client, None);
        wizard.apply(WizardInput::GreetingDone).unwrap();
        assert_eq!(
            wizard.apply(WizardInput::Name("   ".into())),
            Err(WizardError::EmptyName)
        );
        assert_eq!(wizard.step(), WizardStep::AskName);
    }

    #[test]
    fn test_out_of_order_input() {
        let mut wizard = Wizard::start(Role::Client, None);
        let err = wizard.apply(WizardInput::Gender(Gender::Male)).unwrap_err();
        assert_eq!(
            err,
            WizardError::Unexpected {
                step: WizardStep::Greeting,
                input: "gender",
            }
        );
        assert_eq!(wizard.step(), WizardStep::Greeting);
    }

    #[test]
    fn test_returning_device_short_circuits() {
        let mut wizard = Wizard::start(Role::Client, Some("abc"));
        assert_eq!(wizard.step(), WizardStep::Returning);
        assert!(wizard.dialog().unwrap().starts_with("¡Bienvenido de vuelta!"));
        assert_eq!(wizard.panel(), Panel::None);
        assert!(wizard.apply(WizardInput::GreetingDone).is_err());
    }

    #[test]
    fn test_greeting_depends_on_role() {
        let timing = WizardConfig::default();
        let client = greeting_script(Role::Client, &timing);
        let admin = greeting_script(Role::Admin, &timing);

        assert_eq!(client.len(), 3);
        assert_eq!(client[0].text, "Hola.");
        assert_eq!(client[0].hold, Duration::from_millis(4500));
        assert_eq!(client[2].text, "Por favor, dime tu nombre.");
        assert!(admin[2].text.contains("administrador"));
    }

    #[test]
    fn test_name_timer_fires_only_for_last_keystroke() {
        let mut timer = NameTimer::default();
        let first = timer.arm();
        let second = timer.arm();
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));

        let last = timer.arm();
        assert!(!timer.is_current(second));
        assert!(timer.is_current(last));
    }

    #[test]
    fn test_name_timer_cancelled_by_step_change() {
        let mut timer = NameTimer::default();
        let pending = timer.arm();
        timer.cancel();
        assert!(!timer.is_current(pending));
    }

    #[test]
    fn test_name_key() {
        assert_eq!(name_key(" Ana ", true), NameKey::Submit("Ana".into()));
        assert_eq!(name_key("An", false), NameKey::Debounce("An".into()));
        assert_eq!(name_key("   ", true), NameKey::Clear);
        assert_eq!(name_key("", false), NameKey::Clear);
    }

    #[test]
    fn test_dialog_uses_name() {
        let mut wizard = named(Role::Client, "Sofía");
        wizard.apply(WizardInput::ConfirmName(true)).unwrap();
        assert_eq!(
            wizard.dialog().as_deref(),
            Some("Sofía, ¿en cuál de estos grupos te encuentras según tu edad?")
        );
        assert_eq!(wizard.panel(), Panel::AgeOptions);
    }
}
