// Public API - what other modules can use
pub use handlers::{add_country, delete_country};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
