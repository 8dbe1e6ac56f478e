use serde::{Deserialize, Serialize};

/// JWT claims identifying an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub iat: usize, // Issued at timestamp (standard JWT claim)
    pub exp: usize, // Expiration timestamp (standard JWT claim)
}
