//! User account management: the write path of the user directory.
//!
//! Passwords are hashed here, explicitly, before a record reaches the
//! store. Updates that carry no new password never touch the stored hash.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::auth::password::{HashError, PasswordHasher};
use crate::directory::{DirectoryError, UserStore};
use crate::models::{NewUser, NewUserRecord, Principal, UserChanges, UserUpdate};
use crate::validation::{
    MIN_PASSWORD_LEN, UserFields, is_valid_email, is_valid_phone, password_long_enough,
    user_violations,
};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid user: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Storage(#[from] DirectoryError),
}

/// Creates and updates users through a [`UserStore`].
#[derive(Clone)]
pub struct UserAccounts {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl UserAccounts {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Validate, hash the password once, and persist.
    #[instrument(skip_all, fields(username = %new_user.username))]
    pub async fn create(&self, new_user: NewUser) -> Result<Principal, AccountError> {
        let violations = user_violations(&UserFields {
            name: &new_user.name,
            username: &new_user.username,
            password: &new_user.password,
            email: &new_user.email,
            phone: &new_user.phone,
            roles: &new_user.roles,
        });
        if !violations.is_empty() {
            return Err(AccountError::Invalid(violations));
        }

        let password_hash = self.hasher.hash(&new_user.password)?;
        let user = self
            .store
            .insert_user(NewUserRecord {
                name: new_user.name,
                username: new_user.username,
                password_hash,
                email: new_user.email,
                phone: new_user.phone,
                disabled: new_user.disabled,
                roles: new_user.roles,
            })
            .await?;
        info!(id = %user.id, "user created");
        Ok(user.into())
    }

    /// Apply a partial update. Only a present password is hashed.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: UserUpdate) -> Result<Principal, AccountError> {
        let violations = update_violations(&update);
        if !violations.is_empty() {
            return Err(AccountError::Invalid(violations));
        }

        let password_hash = match update.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password)?),
            None => None,
        };
        let changes = UserChanges {
            name: update.name,
            password_hash,
            email: update.email,
            phone: update.phone,
            disabled: update.disabled,
            roles: update.roles,
        };
        let user = self.store.update_user(id, changes).await?;
        Ok(user.into())
    }

    pub async fn set_disabled(&self, id: &str, disabled: bool) -> Result<Principal, AccountError> {
        self.update(
            id,
            UserUpdate {
                disabled: Some(disabled),
                ..Default::default()
            },
        )
        .await
    }
}

fn update_violations(update: &UserUpdate) -> Vec<String> {
    let mut violations = Vec::new();
    if update.name.as_deref().is_some_and(str::is_empty) {
        violations.push("name must not be empty".to_string());
    }
    if update
        .password
        .as_deref()
        .is_some_and(|p| !password_long_enough(p))
    {
        violations.push(format!("password length below {MIN_PASSWORD_LEN}"));
    }
    if update.email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        violations.push("invalid email format".to_string());
    }
    if update.phone.as_deref().is_some_and(|p| !is_valid_phone(p)) {
        violations.push("invalid phone format".to_string());
    }
    if update.roles.as_ref().is_some_and(Vec::is_empty) {
        violations.push("at least one role is required".to_string());
    }
    violations
}
