// Public API - what other modules can use
pub use handlers::{get_user_data, login, register};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub(crate) const DUPLICATE_USERNAME: &str = "Username already exists!";
