//! JWT token generation and verification.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::AuthError;
use crate::models::{Principal, TokenPayload};

/// Default access token lifetime: 1 hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Issues and verifies HS256 access tokens. Stateless: nothing is recorded
/// about issued tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Token service with the default one-hour lifetime.
    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    /// Configured lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Sign a fresh token for `principal`.
    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal("token expiry out of range".into()))?;
        let payload = TokenPayload {
            username: principal.username.clone(),
            sub: principal.id.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        self.sign(&payload)
    }

    /// Re-issue for an already authenticated principal with fresh `iat`/`exp`.
    /// Holding a valid token stands in for re-entering the password.
    pub fn refresh(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue(principal)
    }

    /// Verify signature and expiry, returning the claims on success.
    pub fn verify(&self, token: &str) -> Result<TokenPayload, AuthError> {
        decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })
    }

    fn sign(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), payload, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }
}
