use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct UserModel {
    pub id: i32,
    pub username: String, // Unique, case-sensitive
    #[sqlx(rename = "password")]
    pub password_hash: String, // bcrypt digest, never the plaintext
}
