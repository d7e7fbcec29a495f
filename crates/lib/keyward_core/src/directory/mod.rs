//! Directory adapters: user and role storage behind async traits.
//!
//! The authentication engine only depends on [`UserDirectory`]. The write
//! side ([`UserStore`], [`RoleStore`]) is used by account management and
//! bootstrap.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryDirectory;
pub use postgres::PgDirectory;

use crate::models::{NewUserRecord, Principal, RoleRecord, User, UserChanges};

/// Storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Unique username/email or role id already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => DirectoryError::NotFound("row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DirectoryError::Conflict(db.message().to_string())
            }
            other => DirectoryError::Unavailable(other.to_string()),
        }
    }
}

/// Read-side user lookup used during authentication.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Exact username match, including the password hash.
    async fn find_for_auth(&self, username: &str) -> Result<Option<User>, DirectoryError>;

    /// Exact username match without the password hash, for profiles.
    async fn find_profile(&self, username: &str) -> Result<Option<Principal>, DirectoryError>;

    async fn exists(&self, username: &str) -> Result<bool, DirectoryError>;
}

/// Write side of the user directory. Records arrive already hashed.
#[async_trait]
pub trait UserStore: UserDirectory {
    async fn insert_user(&self, record: NewUserRecord) -> Result<User, DirectoryError>;

    async fn update_user(&self, id: &str, changes: UserChanges) -> Result<User, DirectoryError>;

    /// All users in creation order, without password hashes.
    async fn list_users(&self) -> Result<Vec<Principal>, DirectoryError>;

    async fn count_users(&self) -> Result<u64, DirectoryError>;

    /// Delete every user, returning how many were removed.
    async fn clear_users(&self) -> Result<u64, DirectoryError>;
}

/// Persistence for the role table.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn insert_roles(&self, roles: Vec<RoleRecord>) -> Result<Vec<RoleRecord>, DirectoryError>;

    /// All roles ordered by id.
    async fn list_roles(&self) -> Result<Vec<RoleRecord>, DirectoryError>;

    async fn count_roles(&self) -> Result<u64, DirectoryError>;

    /// Delete every role, returning how many were removed.
    async fn clear_roles(&self) -> Result<u64, DirectoryError>;
}

/// A store whose backend is unreachable: every call fails with
/// [`DirectoryError::Unavailable`].
#[cfg(test)]
pub(crate) struct OfflineDirectory;

#[cfg(test)]
impl OfflineDirectory {
    fn down<T>() -> Result<T, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".into()))
    }
}

#[cfg(test)]
#[async_trait]
impl UserDirectory for OfflineDirectory {
    async fn find_for_auth(&self, _username: &str) -> Result<Option<User>, DirectoryError> {
        Self::down()
    }

    async fn find_profile(&self, _username: &str) -> Result<Option<Principal>, DirectoryError> {
        Self::down()
    }

    async fn exists(&self, _username: &str) -> Result<bool, DirectoryError> {
        Self::down()
    }
}

#[cfg(test)]
#[async_trait]
impl UserStore for OfflineDirectory {
    async fn insert_user(&self, _record: NewUserRecord) -> Result<User, DirectoryError> {
        Self::down()
    }

    async fn update_user(&self, _id: &str, _changes: UserChanges) -> Result<User, DirectoryError> {
        Self::down()
    }

    async fn list_users(&self) -> Result<Vec<Principal>, DirectoryError> {
        Self::down()
    }

    async fn count_users(&self) -> Result<u64, DirectoryError> {
        Self::down()
    }

    async fn clear_users(&self) -> Result<u64, DirectoryError> {
        Self::down()
    }
}

#[cfg(test)]
#[async_trait]
impl RoleStore for OfflineDirectory {
    async fn insert_roles(&self, _roles: Vec<RoleRecord>) -> Result<Vec<RoleRecord>, DirectoryError> {
        Self::down()
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, DirectoryError> {
        Self::down()
    }

    async fn count_roles(&self) -> Result<u64, DirectoryError> {
        Self::down()
    }

    async fn clear_roles(&self) -> Result<u64, DirectoryError> {
        Self::down()
    }
}
