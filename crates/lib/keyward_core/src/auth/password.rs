//! Password hashing via bcrypt.

use thiserror::Error;
use tracing::debug;

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

/// One-way password hashing and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Hasher with the production cost of 12.
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Hasher with an explicit cost (bcrypt accepts 4..=31).
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password. Call once per password creation or change.
    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| HashError(format!("bcrypt hash: {e}")))
    }

    /// Compare a plaintext password with a stored hash.
    ///
    /// A malformed hash counts as a mismatch.
    pub fn compare(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(matched) => matched,
            Err(e) => {
                debug!(error = %e, "stored password hash could not be verified");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn hash_differs_from_plaintext_and_verifies() {
        let hasher = fast();
        for plaintext in ["123456", "correct horse battery staple", "密码密码密码"] {
            let hash = hasher.hash(plaintext).unwrap();
            assert_ne!(hash, plaintext);
            assert!(hasher.compare(plaintext, &hash));
        }
    }

    #[test]
    fn different_password_does_not_verify() {
        let hasher = fast();
        let hash = hasher.hash("123456").unwrap();
        assert!(!hasher.compare("1234567", &hash));
        assert!(!hasher.compare("wrong", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = fast();
        assert_ne!(hasher.hash("123456").unwrap(), hasher.hash("123456").unwrap());
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let hasher = fast();
        assert!(!hasher.compare("123456", "not-a-bcrypt-hash"));
        assert!(!hasher.compare("123456", ""));
    }

    #[test]
    fn default_cost_is_twelve() {
        let hasher = PasswordHasher::default();
        assert_eq!(hasher.cost(), 12);
        let hash = hasher.hash("123456").unwrap();
        assert!(hash.starts_with("$2b$12$"), "{hash}");
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(PasswordHasher::with_cost(2).hash("123456").is_err());
    }
}
