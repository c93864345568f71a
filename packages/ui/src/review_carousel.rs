//! Modal that walks an admin through the pending price-review tasks.

use api::review::{load_review, review_due, submit_review};
use chrono::Utc;
use dioxus::prelude::*;
use store::format::{format_amount_es_co, format_date_es_co};
use store::{parse_new_price, CarouselStep, ReviewAction, ReviewGate, ReviewModal, Task};

use crate::browser;
use crate::client::{make_api, make_store, use_client_config};
use crate::icons::{
    FaArrowsRotate, FaBan, FaCheck, FaClipboardList, FaFloppyDisk, FaTriangleExclamation,
    FaUpRightFromSquare, FaXmark,
};
use crate::views::ModalOverlay;
use crate::Icon;

const ALL_DONE: &str = "¡Todas las tareas han sido procesadas!";
const INVALID_PRICE: &str = "Debe ingresar un precio válido";

/// Checks the review gate on mount and, when it opens and tasks are
/// pending, shows them one at a time.
#[component]
pub fn ReviewCarousel() -> Element {
    let config = use_client_config();
    let client_store = use_hook(make_store);
    let api = use_signal(|| make_api(&config));
    let mut modal = use_signal(ReviewModal::default);
    let mut editing = use_signal(|| false);
    let mut new_price = use_signal(String::new);

    let keys = config.review.clone();
    let _loader = use_resource(move || {
        let client_store = client_store.clone();
        let keys = keys.clone();
        async move {
            let api = api.peek().clone();
            let gate = ReviewGate::new(&client_store, &keys);
            let now = Utc::now();
            if !review_due(&api, &gate, now).await {
                return;
            }
            if let Some(loaded) = load_review(&api, &gate, now).await {
                modal.set(ReviewModal::open(loaded));
            }
        }
    });

    let act = move |action: ReviewAction| {
        let mut modal = modal;
        let Some(mut state) = modal.write().begin() else {
            return;
        };
        spawn(async move {
            let api = api.peek().clone();
            match submit_review(&api, &mut state, action).await {
                Ok(step) => {
                    modal.write().finish(Some(state));
                    editing.set(false);
                    new_price.set(String::new());
                    if step == CarouselStep::Finished {
                        browser::alert(ALL_DONE);
                    }
                }
                Err(e) => {
                    modal.write().finish(None);
                    tracing::error!("Review {} failed: {}", action.code(), e);
                    browser::alert(&e.review_alert(action));
                }
            }
        });
    };

    let save_price = move |_| match parse_new_price(&new_price.peek()) {
        Ok(price) => act(ReviewAction::Update { new_price: price }),
        Err(e) => {
            tracing::debug!("rejected price input: {}", e);
            browser::alert(INVALID_PRICE);
        }
    };

    let (task, counter, disabled) = {
        let view = modal.read();
        let Some(state) = view.carousel() else {
            return rsx! {};
        };
        let Some(task) = state.current().cloned() else {
            return rsx! {};
        };
        let counter = state.counter_label().unwrap_or_default();
        (task, counter, view.is_busy())
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| modal.write().close(),
            close_on_backdrop: false,
            class: "review",
            div {
                class: "review__header",
                div {
                    h3 {
                        class: "review__title",
                        Icon { icon: FaClipboardList, width: 18, height: 18 }
                        " Revisión de Cotizaciones"
                    }
                    p { class: "review__counter", "{counter}" }
                }
                button {
                    class: "review__close",
                    title: "Cerrar",
                    onclick: move |_| modal.write().close(),
                    Icon { icon: FaXmark, width: 16, height: 16 }
                }
            }
            TaskDetails { task: task.clone() }
            if editing() {
                div {
                    class: "review__update",
                    label { r#for: "review-new-price", "Nuevo precio" }
                    input {
                        id: "review-new-price",
                        class: "review__price-input",
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        placeholder: task.price_input_hint(),
                        value: "{new_price}",
                        oninput: move |evt: FormEvent| new_price.set(evt.value()),
                        onmounted: move |evt: MountedEvent| async move {
                            let _ = evt.set_focus(true).await;
                        },
                    }
                    button {
                        class: "review-btn review-btn--save",
                        disabled,
                        onclick: save_price,
                        Icon { icon: FaFloppyDisk, width: 14, height: 14 }
                        " Guardar"
                    }
                }
            }
            div {
                class: "review__actions",
                button {
                    class: "review-btn review-btn--reject",
                    disabled,
                    onclick: move |_| act(ReviewAction::Reject),
                    Icon { icon: FaBan, width: 14, height: 14 }
                    " Estoy Ocupado"
                }
                div {
                    class: "review__actions-main",
                    button {
                        class: "review-btn review-btn--confirm",
                        disabled,
                        onclick: move |_| act(ReviewAction::Confirm),
                        Icon { icon: FaCheck, width: 14, height: 14 }
                        " Confirmar Precio"
                    }
                    button {
                        class: "review-btn review-btn--update",
                        disabled,
                        onclick: move |_| editing.set(true),
                        Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                        " Actualizar Precio"
                    }
                }
            }
        }
    }
}

#[component]
fn TaskDetails(task: Task) -> Element {
    let price = format_amount_es_co(task.precio);
    let updated = format_date_es_co(&task.fecha_actualizacion);
    let quote_url = task.quote_url().map(str::to_string);

    rsx! {
        div {
            class: "review__body",
            p {
                class: "review__overdue",
                Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                " Esta cotización tiene "
                strong { "{task.dias_vencido} días" }
                " sin actualizar"
            }
            dl {
                class: "review__fields",
                dt { "Medicamento" }
                dd { "{task.medicamento}" }
                dt { "Fabricante" }
                dd { "{task.fabricante}" }
                dt { "Competidor" }
                dd { "{task.competidor}" }
                dt { "Precio actual" }
                dd { class: "review__price", "${price}" }
                dt { "Última actualización" }
                dd { "{updated}" }
            }
            if let Some(url) = quote_url {
                a {
                    class: "review__link",
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    Icon { icon: FaUpRightFromSquare, width: 12, height: 12 }
                    " Abrir Cotización Original"
                }
            }
        }
    }
}
