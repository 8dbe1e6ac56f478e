// Library crate for the visited countries backend
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod country;
pub mod db;
pub mod routes;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use auth::{Claims, PasswordHasher, TokenConfig};
pub use config::AppConfig;
pub use routes::create_router;
pub use shared::{AppError, AppState};
