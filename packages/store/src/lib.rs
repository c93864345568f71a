pub mod carousel;
pub mod config;
pub mod format;
pub mod gate;
pub mod models;
pub mod storage;
pub mod wizard;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web::WebStore;

pub use carousel::{parse_new_price, CarouselStep, PriceError, ReviewModal, TaskCarousel};
pub use config::ClientConfig;
pub use gate::{AlertFrequency, ReviewGate};
pub use models::{
    AgeBracket, AgeChoice, Gender, Profile, ReviewAction, ReviewResponse, Role, Task,
    WeightBracket, WeightChoice, WelcomeSubmission,
};
pub use storage::{ClientStore, Scope};
pub use wizard::{Wizard, WizardError, WizardInput, WizardStep};
