use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::{debug, instrument};

use super::types::Claims;

/// Default token lifetime
pub const DEFAULT_EXPIRATION_DAYS: i64 = 4;

/// Longest accepted token lifetime
pub const MAX_EXPIRATION_DAYS: i64 = 365;

#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Configuration for JWT token operations.
///
/// Keys are derived once from the process-wide secret. Rotating the secret
/// invalidates every token issued under the previous one.
#[derive(Clone)]
pub struct TokenConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    pub expiration_days: i64,
}

impl TokenConfig {
    pub fn new(secret: &str, expiration_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_days,
        }
    }

    /// Creates a new JWT token for the given user
    #[instrument(skip(self, username))]
    pub fn create_token(&self, id: i32, username: &str) -> Result<String, TokenError> {
        self.create_token_at(id, username, Utc::now())
    }

    fn create_token_at(
        &self,
        id: i32,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = Duration::try_days(self.expiration_days)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                TokenError::Encoding(format!(
                    "expiration of {} days is out of range",
                    self.expiration_days
                ))
            })?;

        let iat = issued_at.timestamp().max(0) as usize;
        let exp = expires_at.timestamp().max(0) as usize;

        debug!(
            expiration_days = self.expiration_days,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = Claims {
            id,
            username: username.to_string(),
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            TokenError::Encoding(e.to_string())
        })
    }

    /// Validates a JWT token and returns the claims if both signature and expiry check out
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        debug!("Decoding and validating JWT token");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| {
                debug!(
                    user_id = data.claims.id,
                    username = %data.claims.username,
                    exp = data.claims.exp,
                    "JWT token decoded successfully"
                );
                data.claims
            })
            .map_err(|e| {
                debug!(error = %e, "Failed to decode JWT token");
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })
    }
}
