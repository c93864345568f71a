mod welcome;
pub use welcome::Welcome;

mod admin_menu;
pub use admin_menu::AdminMenu;

mod not_found;
pub use not_found::NotFound;
