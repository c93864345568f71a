//! The onboarding chat shown on `/bienvenida`.
//!
//! [`store::Wizard`] decides what comes next; this component only plays the
//! greeting, animates the bubble and the control panel, and posts the
//! profile when the wizard reaches [`WizardStep::Submitting`].

use std::time::Duration;

use api::ApiClient;
use chrono::Utc;
use dioxus::prelude::*;
use store::wizard::{greeting_script, name_key, InputKind, NameKey, NameTimer, Panel};
use store::{
    AgeBracket, AgeChoice, ClientStore, Gender, Role, WeightBracket, WeightChoice, Wizard,
    WizardInput, WizardStep,
};

use crate::browser;
use crate::client::{make_api, make_store, use_client_config};
use crate::icons::{FaCheck, FaPen, FaXmark};
use crate::Icon;

/// Cookie the backend sets once a device has been registered.
pub const DEVICE_COOKIE: &str = "dispositivo_id";

/// Signals shared by every handler of the welcome page.
#[derive(Clone, Copy)]
struct WelcomeFlow {
    wizard: Signal<Wizard>,
    message: Signal<String>,
    message_visible: Signal<bool>,
    dimmed: Signal<bool>,
    panel: Signal<Panel>,
    panel_visible: Signal<bool>,
    field: Signal<String>,
    name_timer: Signal<NameTimer>,
    api: Signal<ApiClient>,
    device_id: Signal<Option<String>>,
    hide: Duration,
    debounce: Duration,
}

impl WelcomeFlow {
    /// Feed `input` to the wizard and animate to the resulting step.
    /// Inputs the current step does not accept are dropped.
    fn send(mut self, input: WizardInput) {
        let step = match self.wizard.write().apply(input) {
            Ok(step) => step,
            Err(e) => {
                tracing::debug!("welcome input ignored: {}", e);
                return;
            }
        };
        self.name_timer.write().cancel();
        spawn(async move {
            self.present(step).await;
        });
    }

    async fn present(mut self, step: WizardStep) {
        match step {
            WizardStep::ConfirmName => self.reveal(),
            WizardStep::AskName => {
                let prefill = self.wizard.peek().name_prefill().to_string();
                self.field.set(prefill);
                self.reveal();
            }
            WizardStep::Submitting => {
                self.panel_visible.set(false);
                browser::sleep(self.hide).await;
                self.panel.set(Panel::None);
                self.show_dialog();
                self.submit().await;
            }
            _ => {
                self.panel_visible.set(false);
                browser::sleep(self.hide).await;
                self.field.set(String::new());
                self.show_dialog();
                self.reveal();
            }
        }
    }

    fn show_dialog(mut self) {
        if let Some(text) = self.wizard.peek().dialog() {
            self.message.set(text);
        }
        self.dimmed.set(false);
        self.message_visible.set(true);
    }

    fn reveal(mut self) {
        let panel = self.wizard.peek().panel();
        self.panel.set(panel);
        self.panel_visible.set(true);
    }

    /// Key-up in the shared text field.
    fn key_up(mut self, enter: bool) {
        let step = self.wizard.peek().step();
        match step {
            WizardStep::AskName => {
                let ticket = self.name_timer.write().arm();
                let value = self.field.peek().clone();
                match name_key(&value, enter) {
                    NameKey::Submit(name) => self.send(WizardInput::Name(name)),
                    NameKey::Debounce(name) => {
                        spawn(async move {
                            browser::sleep(self.debounce).await;
                            if self.name_timer.peek().is_current(ticket) {
                                self.send(WizardInput::Name(name));
                            }
                        });
                    }
                    NameKey::Clear => {}
                }
            }
            WizardStep::AskExactAge if enter => {
                let raw = self.field.peek().clone();
                self.send(WizardInput::ExactAge(raw));
            }
            WizardStep::AskExactWeight if enter => {
                let raw = self.field.peek().clone();
                self.send(WizardInput::ExactWeight(raw));
            }
            _ => {}
        }
    }

    async fn submit(self) {
        let profile = self.wizard.peek().profile().clone();
        let device_id = self.device_id.peek().clone();
        let api = self.api.peek().clone();
        match api::welcome::submit_welcome(&api, &profile, device_id, Utc::now()).await {
            Ok(url) => browser::redirect(&url),
            Err(e) => {
                tracing::error!("Failed to save welcome data: {}", e);
                browser::alert(&e.welcome_alert());
                browser::reload();
            }
        }
    }
}

/// Scripted onboarding dialog. `role` comes from the `rol_master` URL
/// parameter.
#[component]
pub fn WelcomeWizard(role: Role) -> Element {
    let config = use_client_config();
    let client_store = use_hook(make_store);
    let device_id = use_signal(|| client_store.cookie(DEVICE_COOKIE));
    let wizard = use_signal(|| Wizard::start(role, device_id.peek().as_deref()));
    let api = use_signal(|| make_api(&config));

    let mut message = use_signal(String::new);
    let mut message_visible = use_signal(|| false);
    let mut dimmed = use_signal(|| false);
    let panel = use_signal(|| Panel::None);
    let panel_visible = use_signal(|| false);
    let mut field = use_signal(String::new);
    let name_timer = use_signal(NameTimer::default);

    let flow = WelcomeFlow {
        wizard,
        message,
        message_visible,
        dimmed,
        panel,
        panel_visible,
        field,
        name_timer,
        api,
        device_id,
        hide: config.wizard.hide(),
        debounce: config.wizard.debounce(),
    };

    let timing = config.wizard.clone();
    use_effect(move || {
        let timing = timing.clone();
        spawn(async move {
            if wizard.peek().step() == WizardStep::Returning {
                if let Some(text) = wizard.peek().dialog() {
                    message.set(text);
                }
                message_visible.set(true);
                browser::sleep(timing.returning_redirect()).await;
                browser::redirect(&timing.returning_redirect_url);
                return;
            }

            for line in greeting_script(role, &timing) {
                message.set(line.text.to_string());
                message_visible.set(true);
                browser::sleep(line.hold).await;
                message_visible.set(false);
                browser::sleep(timing.fade_out()).await;
            }
            flow.send(WizardInput::GreetingDone);
            message_visible.set(true);
            dimmed.set(true);
        });
    });

    let confirmation = wizard.read().confirmation_text().unwrap_or_default();

    rsx! {
        div {
            class: "welcome",
            p {
                class: "welcome__message",
                class: if message_visible() { "welcome__message--visible" },
                class: if dimmed() { "welcome__message--dimmed" },
                "{message}"
            }
            div {
                class: "welcome__panel",
                class: if panel_visible() { "welcome__panel--visible" },
                {match panel() {
                    Panel::None => rsx! {},
                    Panel::TextInput(spec) => rsx! {
                        input {
                            class: "welcome__input",
                            r#type: if spec.kind == InputKind::Number { "number" } else { "text" },
                            placeholder: spec.placeholder,
                            maxlength: spec.max_length.map(|n| n.to_string()),
                            step: spec.step,
                            max: spec.max,
                            value: "{field}",
                            oninput: move |evt: FormEvent| field.set(evt.value()),
                            onkeyup: move |evt: KeyboardEvent| flow.key_up(evt.key() == Key::Enter),
                            onmounted: move |evt: MountedEvent| async move {
                                let _ = evt.set_focus(true).await;
                            },
                        }
                    },
                    Panel::Confirmation => rsx! {
                        div {
                            class: "welcome__confirm",
                            p { class: "welcome__confirm-text", "{confirmation}" }
                            div {
                                class: "welcome__options",
                                button {
                                    class: "chat-btn",
                                    onclick: move |_| flow.send(WizardInput::ConfirmName(true)),
                                    Icon { icon: FaCheck, width: 14, height: 14 }
                                    " Sí"
                                }
                                button {
                                    class: "chat-btn chat-btn--secondary",
                                    onclick: move |_| flow.send(WizardInput::ConfirmName(false)),
                                    Icon { icon: FaXmark, width: 14, height: 14 }
                                    " No"
                                }
                            }
                        }
                    },
                    Panel::AgeOptions => rsx! {
                        div {
                            class: "welcome__options",
                            for bracket in AgeBracket::ALL {
                                button {
                                    key: "{bracket.years()}",
                                    class: "chat-btn",
                                    onclick: move |_| flow.send(WizardInput::Age(AgeChoice::Bracket(bracket))),
                                    "{bracket.label()}"
                                }
                            }
                            button {
                                class: "chat-btn chat-btn--secondary",
                                onclick: move |_| flow.send(WizardInput::Age(AgeChoice::Specify)),
                                Icon { icon: FaPen, width: 12, height: 12 }
                                " Especificar edad"
                            }
                        }
                    },
                    Panel::WeightOptions => rsx! {
                        div {
                            class: "welcome__options",
                            for bracket in WeightBracket::ALL {
                                button {
                                    key: "{bracket.kilograms()}",
                                    class: "chat-btn",
                                    onclick: move |_| flow.send(WizardInput::Weight(WeightChoice::Bracket(bracket))),
                                    "{bracket.label()}"
                                }
                            }
                            button {
                                class: "chat-btn chat-btn--secondary",
                                onclick: move |_| flow.send(WizardInput::Weight(WeightChoice::Specify)),
                                Icon { icon: FaPen, width: 12, height: 12 }
                                " Especificar peso"
                            }
                        }
                    },
                    Panel::GenderOptions => rsx! {
                        div {
                            class: "welcome__options",
                            for gender in Gender::ALL {
                                button {
                                    key: "{gender.label()}",
                                    class: "chat-btn",
                                    onclick: move |_| flow.send(WizardInput::Gender(gender)),
                                    "{gender.label()}"
                                }
                            }
                        }
                    },
                }}
            }
        }
    }
}
