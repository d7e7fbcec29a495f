//! Authentication facade: login, token verification, refresh and logout.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::AuthError;
use super::credentials::CredentialValidator;
use super::jwt::TokenService;
use super::password::PasswordHasher;
use crate::config::{AuthConfig, ConfigError, MAX_TOKEN_TTL_SECS};
use crate::directory::UserDirectory;
use crate::models::{LoginResponse, LogoutAck, Principal, TokenPayload};

/// Token type reported to clients.
pub const TOKEN_TYPE: &str = "Bearer";

/// Message returned on logout.
pub const LOGOUT_MESSAGE: &str = "logged out; discard the access token on the client";

/// Progress of a single login attempt.
///
/// `Start → CredentialsChecked → AccountStatusChecked → TokenIssued`, or
/// `Rejected` after either check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    Start,
    CredentialsChecked,
    AccountStatusChecked,
    TokenIssued,
    Rejected,
}

/// Composes credential checks and token handling for the HTTP layer.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    credentials: CredentialValidator,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            credentials: CredentialValidator::new(directory.clone(), hasher),
            directory,
            tokens,
        }
    }

    /// Production wiring: cost-12 hasher, secret and lifetime from `config`.
    ///
    /// Lifetimes outside `1..=MAX_TOKEN_TTL_SECS` are rejected.
    pub fn from_config(
        directory: Arc<dyn UserDirectory>,
        config: &AuthConfig,
    ) -> Result<Self, ConfigError> {
        let ttl = Some(config.token_ttl_secs)
            .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ConfigError::InvalidTtl(config.token_ttl_secs.to_string()))?;
        Ok(Self::new(
            directory,
            PasswordHasher::new(),
            TokenService::new(config.jwt_secret.as_bytes(), ttl),
        ))
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Authenticate with username + password.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// [`AuthError::InvalidCredentials`]; a disabled account with the right
    /// password fails with [`AuthError::AccountDisabled`].
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let mut stage = LoginStage::Start;
        debug!(?stage, "login attempt");

        let Some(user) = self.credentials.validate(username, password).await else {
            stage = LoginStage::Rejected;
            warn!(?stage, "login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };
        stage = LoginStage::CredentialsChecked;
        debug!(?stage);

        if user.disabled {
            stage = LoginStage::Rejected;
            warn!(?stage, "login failed: account disabled");
            return Err(AuthError::AccountDisabled);
        }
        stage = LoginStage::AccountStatusChecked;
        debug!(?stage);

        let principal = user.to_principal();
        let response = self.respond(principal)?;
        stage = LoginStage::TokenIssued;
        info!(?stage, "login succeeded");
        Ok(response)
    }

    /// Verify an access token. Every failure cause reads as
    /// [`AuthError::InvalidToken`].
    pub fn verify_access_token(&self, token: &str) -> Result<TokenPayload, AuthError> {
        self.tokens.verify(token)
    }

    /// Resolve a bearer token to the current profile of its user.
    ///
    /// A token for a user that no longer exists, or a failed lookup, is
    /// rejected as [`AuthError::InvalidToken`]; a disabled user as
    /// [`AuthError::AccountDisabled`].
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let payload = self.verify_access_token(token)?;
        let principal = match self.directory.find_profile(&payload.username).await {
            Ok(Some(principal)) => principal,
            Ok(None) => {
                debug!(username = %payload.username, "token subject no longer exists");
                return Err(AuthError::InvalidToken);
            }
            Err(e) => {
                error!(error = %e, "directory lookup failed during token authentication");
                return Err(AuthError::InvalidToken);
            }
        };
        if principal.id != payload.sub {
            debug!(username = %payload.username, "token subject id does not match stored user");
            return Err(AuthError::InvalidToken);
        }
        if principal.disabled {
            return Err(AuthError::AccountDisabled);
        }
        Ok(principal)
    }

    /// Re-issue a token for an already authenticated principal.
    pub fn refresh(&self, principal: &Principal) -> Result<LoginResponse, AuthError> {
        debug!(username = %principal.username, "refreshing access token");
        self.respond(principal.clone())
    }

    /// Nothing to invalidate server-side; tells the client to drop its token.
    pub fn logout(&self) -> LogoutAck {
        LogoutAck {
            message: LOGOUT_MESSAGE.to_string(),
        }
    }

    fn respond(&self, principal: Principal) -> Result<LoginResponse, AuthError> {
        let access_token = self.tokens.issue(&principal)?;
        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.tokens.ttl_secs(),
            user: principal,
        })
    }
}
