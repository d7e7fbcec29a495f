//! # keyward_core
//!
//! Authentication and authorization engine for Keyward: the fixed role
//! model, seed-data checks, password hashing, bearer tokens and the login
//! facade consumed by the HTTP layer.

pub mod accounts;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod directory;
pub mod migrate;
pub mod models;
pub mod roles;
pub mod seed;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
