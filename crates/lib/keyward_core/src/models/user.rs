//! User records and the write-path payloads that produce them.

use chrono::{DateTime, Utc};

use super::auth::Principal;
use crate::roles::Role;

/// Stored user, including the password hash. Only lives for the
/// duration of a single directory call or credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub disabled: bool,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Project into the caller-facing identity, dropping the hash.
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            disabled: self.disabled,
            roles: self.roles.clone(),
        }
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Principal {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            phone: user.phone,
            disabled: user.disabled,
            roles: user.roles,
        }
    }
}

/// Request to create a user. `password` is plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub disabled: bool,
    pub roles: Vec<Role>,
}

/// Partial update. A `None` password leaves the stored hash untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub disabled: Option<bool>,
    pub roles: Option<Vec<Role>>,
}

/// A [`NewUser`] after hashing, ready for a store.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone: String,
    pub disabled: bool,
    pub roles: Vec<Role>,
}

/// A [`UserUpdate`] after hashing, ready for a store.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub disabled: Option<bool>,
    pub roles: Option<Vec<Role>>,
}
