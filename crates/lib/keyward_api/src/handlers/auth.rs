//! Authentication request handlers.

use axum::extract::State;
use axum::{Extension, Json};
use keyward_core::models::{LoginResponse, LogoutAck, Principal};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::LoginRequest;

/// `POST /auth/login`: authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    body.validate()?;
    let resp = state.auth.login(&body.username, &body.password).await?;
    Ok(Json(resp))
}

/// `GET /auth/profile`: the authenticated caller's profile.
pub async fn profile_handler(
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
) -> Json<Principal> {
    Json(principal)
}

/// `POST /auth/logout`: stateless; the client discards its token.
pub async fn logout_handler(State(state): State<AppState>) -> Json<LogoutAck> {
    Json(state.auth.logout())
}

/// `POST /auth/refresh`: re-issue a token for the authenticated caller.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(principal)): Extension<AuthenticatedUser>,
) -> AppResult<Json<LoginResponse>> {
    let resp = state.auth.refresh(&principal)?;
    Ok(Json(resp))
}
