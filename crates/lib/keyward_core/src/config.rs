//! Authentication configuration read from the environment.

use std::fmt;
use std::path::PathBuf;

use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::jwt::DEFAULT_TOKEN_TTL_SECS;

/// Longest accepted access token lifetime: 365 days.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when running in production")]
    MissingSecret,

    #[error("invalid token lifetime '{0}' (expected e.g. 3600, 90s, 30m, 1h, 7d; at most 365d)")]
    InvalidTtl(String),
}

/// Deployment environment, from `APP_ENV` (falling back to `NODE_ENV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Unrecognized values are treated as development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        })
    }
}

/// Settings for token signing and environment guards.
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: i64,
    pub environment: Environment,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("environment", &self.environment)
            .finish()
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_secs: i64, environment: Environment) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs,
            environment,
        }
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable                     | Default                                   |
    /// |------------------------------|-------------------------------------------|
    /// | `APP_ENV` / `NODE_ENV`       | `development`                             |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted (not in production) |
    /// | `JWT_EXPIRES_IN`             | `1h`                                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(&lookup);
        let token_ttl_secs = match lookup("JWT_EXPIRES_IN").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_ttl(&raw)?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        let jwt_secret = match lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .or_else(|| lookup("AUTH_SECRET").filter(|s| !s.is_empty()))
        {
            Some(secret) => secret,
            None if environment.is_production() => return Err(ConfigError::MissingSecret),
            None => persisted_jwt_secret(),
        };
        Ok(Self {
            jwt_secret,
            token_ttl_secs,
            environment,
        })
    }
}

/// Parse a lifetime such as `3600`, `90s`, `30m`, `1h` or `7d` into seconds.
/// Values above [`MAX_TOKEN_TTL_SECS`] are rejected.
pub fn parse_ttl(raw: &str) -> Result<i64, ConfigError> {
    let value = raw.trim();
    let invalid = || ConfigError::InvalidTtl(raw.to_string());

    let (digits, multiplier) = match value.char_indices().last() {
        Some((idx, 's')) => (&value[..idx], 1),
        Some((idx, 'm')) => (&value[..idx], 60),
        Some((idx, 'h')) => (&value[..idx], 60 * 60),
        Some((idx, 'd')) => (&value[..idx], 24 * 60 * 60),
        Some(_) => (value, 1),
        None => return Err(invalid()),
    };
    let amount: i64 = digits.trim().parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }
    amount
        .checked_mul(multiplier)
        .filter(|secs| *secs <= MAX_TOKEN_TTL_SECS)
        .ok_or_else(invalid)
}

/// Load the development signing secret from disk, generating it on first use.
fn persisted_jwt_secret() -> String {
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match std::fs::write(&secret_path, &secret) {
        Ok(()) => info!(path = %secret_path.display(), "generated new JWT secret"),
        Err(e) => warn!(
            path = %secret_path.display(),
            error = %e,
            "could not persist generated JWT secret; tokens will not survive a restart"
        ),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyward")
        .join("jwt-secret")
}
