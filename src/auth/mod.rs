// Public API - what other modules can use
pub use middleware::jwt_auth;
pub use password::{PasswordError, PasswordHasher};
pub use token::{TokenConfig, TokenError};
pub use types::Claims;

// Internal modules
mod middleware;
pub mod password;
pub mod token;
mod types;
