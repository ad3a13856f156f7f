// Public API - what other modules can use
pub use handlers::{clear_clipboard, create_room, get_clipboard, login_room, save_clipboard};

// Internal modules
pub mod errors;
pub mod generators;
mod handlers;
pub mod models;
pub mod password;
pub mod service;
pub mod store;
pub mod types;
