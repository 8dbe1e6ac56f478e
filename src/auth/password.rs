use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Work factor used when none is configured
pub const DEFAULT_COST: u32 = 10;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// One-way salted password hashing backed by bcrypt.
///
/// The digest embeds both the random salt and the cost, so `verify` needs
/// nothing but the stored string. Both operations are CPU-bound and should be
/// driven from `tokio::task::spawn_blocking`.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[instrument(skip(self, plaintext))]
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        debug!(cost = self.cost, "Hashing password");
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            warn!(error = %e, "Failed to hash password");
            PasswordError::Hash(e)
        })
    }

    /// Returns false for a wrong password and for a digest that cannot be parsed
    #[instrument(skip(self, plaintext, digest))]
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "Stored digest could not be verified");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("pw123").unwrap();

        assert!(hasher.verify("pw123", &digest));
        assert!(!hasher.verify("wrong", &digest));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("pw123").unwrap();
        let second = hasher.hash("pw123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("pw123", &first));
        assert!(hasher.verify("pw123", &second));
    }

    #[test]
    fn test_digest_embeds_cost() {
        let digest = hasher().hash("pw123").unwrap();
        assert!(digest.starts_with("$2b$04$"));

        // Verification reads the cost from the digest, not from the hasher
        assert!(PasswordHasher::default().verify("pw123", &digest));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("pw123", "not-a-bcrypt-digest"));
        assert!(!hasher.verify("pw123", ""));
    }

    #[test]
    fn test_invalid_cost_is_hash_error() {
        let result = PasswordHasher::new(MAX_COST + 1).hash("pw123");
        assert!(matches!(result, Err(PasswordError::Hash(_))));
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordHasher::default().cost(), 10);
    }
}
