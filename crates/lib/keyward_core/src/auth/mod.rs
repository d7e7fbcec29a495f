//! Authentication engine.
//!
//! Password hashing, JWT issuance/verification, credential checks and the
//! login facade that composes them. Storage is reached only through the
//! [`crate::directory`] traits.

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod service;

use thiserror::Error;

pub use credentials::CredentialValidator;
pub use jwt::TokenService;
pub use password::{HashError, PasswordHasher};
pub use service::{AuthService, LoginStage};

/// Authentication errors. Display strings are the caller-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown username or wrong password; deliberately indistinguishable.
    #[error("username or password incorrect")]
    InvalidCredentials,

    #[error("account has been disabled")]
    AccountDisabled,

    /// Bad signature, expired, or otherwise unusable token.
    #[error("invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}
