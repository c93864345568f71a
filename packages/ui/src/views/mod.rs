mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod welcome;
pub use welcome::WelcomeView;

mod admin_menu;
pub use admin_menu::AdminMenuView;
