//! Credential checks: directory lookup followed by password comparison.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use super::password::PasswordHasher;
use crate::directory::UserDirectory;
use crate::models::User;

/// Compared against when the username is unknown, so that a miss costs
/// the same bcrypt work as a wrong password.
const DECOY_PASSWORD: &str = "keyward-decoy-password";

/// Decides whether a username/password pair matches a stored user.
///
/// Fails closed: lookup errors and unusable hashes both read as "no match".
/// Account status is not checked here.
#[derive(Clone)]
pub struct CredentialValidator {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
    decoy_hash: Option<Arc<str>>,
}

impl CredentialValidator {
    /// Hashes a decoy password once, at the hasher's cost.
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: PasswordHasher) -> Self {
        let decoy_hash = match hasher.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(Arc::from(hash)),
            Err(e) => {
                warn!(error = %e, "could not prepare decoy hash; unknown usernames return early");
                None
            }
        };
        Self {
            directory,
            hasher,
            decoy_hash,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn validate(&self, username: &str, password: &str) -> Option<User> {
        let user = match self.directory.find_for_auth(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("no user with that username");
                if let Some(decoy) = &self.decoy_hash {
                    self.hasher.compare(password, decoy);
                }
                return None;
            }
            Err(e) => {
                error!(error = %e, "directory lookup failed during credential check");
                return None;
            }
        };

        if !self.hasher.compare(password, &user.password_hash) {
            debug!("password mismatch");
            return None;
        }

        debug!(disabled = user.disabled, "credentials matched");
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{MemoryDirectory, OfflineDirectory, UserStore};
    use crate::models::NewUserRecord;
    use crate::roles::Role;

    async fn directory_with(hasher: PasswordHasher, password_hash: Option<&str>) -> Arc<MemoryDirectory> {
        let dir = Arc::new(MemoryDirectory::new());
        let password_hash = match password_hash {
            Some(hash) => hash.to_string(),
            None => hasher.hash("123456").unwrap(),
        };
        dir.insert_user(NewUserRecord {
            name: "Sam Chen".into(),
            username: "samchen".into(),
            password_hash,
            email: "samchen@sinabuddy.com".into(),
            phone: "13837147910".into(),
            disabled: true,
            roles: vec![Role::Admin],
        })
        .await
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn matching_password_returns_user_regardless_of_status() {
        let hasher = PasswordHasher::with_cost(4);
        let validator = CredentialValidator::new(directory_with(hasher, None).await, hasher);

        let user = validator.validate("samchen", "123456").await.unwrap();
        assert_eq!(user.username, "samchen");
        assert!(user.disabled);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_none() {
        let hasher = PasswordHasher::with_cost(4);
        let validator = CredentialValidator::new(directory_with(hasher, None).await, hasher);

        assert!(validator.validate("samchen", "wrong").await.is_none());
        assert!(validator.validate("nobody", "123456").await.is_none());
        assert!(validator.validate("SAMCHEN", "123456").await.is_none());
    }

    #[tokio::test]
    async fn unknown_user_still_pays_for_a_compare() {
        let hasher = PasswordHasher::with_cost(4);
        let validator = CredentialValidator::new(directory_with(hasher, None).await, hasher);

        let decoy = validator.decoy_hash.as_deref().expect("decoy hash");
        assert!(decoy.starts_with("$2b$04$"));
        assert!(!hasher.compare("123456", decoy));
        assert!(validator.validate("nobody", DECOY_PASSWORD).await.is_none());
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_none() {
        let hasher = PasswordHasher::with_cost(4);
        let dir = directory_with(hasher, Some("corrupt")).await;
        let validator = CredentialValidator::new(dir, hasher);
        assert!(validator.validate("samchen", "123456").await.is_none());
    }

    #[tokio::test]
    async fn storage_failure_is_none() {
        let validator =
            CredentialValidator::new(Arc::new(OfflineDirectory), PasswordHasher::with_cost(4));
        assert!(validator.validate("samchen", "123456").await.is_none());
    }
}
