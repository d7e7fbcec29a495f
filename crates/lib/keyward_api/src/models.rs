//! Request and response bodies owned by the HTTP layer.
//!
//! Domain responses (`LoginResponse`, `Principal`, `LogoutAck`) are
//! serialized straight from `keyward_core::models`.

use keyward_core::validation::{MIN_PASSWORD_LEN, password_long_enough};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `POST /auth/login` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Shape checks done before the credentials reach the facade.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("username must not be empty".into()));
        }
        if !password_long_enough(&self.password) {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn login_request_shape() {
        assert!(request("samchen", "123456").validate().is_ok());
        assert!(matches!(
            request("  ", "123456").validate(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            request("samchen", "12345").validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: LoginRequest = serde_json::from_str(r#"{"password":"123456"}"#).unwrap();
        assert!(req.username.is_empty());
        assert!(req.validate().is_err());
    }
}
