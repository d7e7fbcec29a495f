//! Authentication middleware: Bearer token extraction and principal lookup.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use keyward_core::models::Principal;

use crate::AppState;
use crate::error::AppError;

/// The caller's current profile, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

/// Axum middleware: extracts `Authorization: Bearer <token>`, resolves it
/// through the facade and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let principal = state.auth.authenticate(token.trim()).await?;
    request.extensions_mut().insert(AuthenticatedUser(principal));

    Ok(next.run(request).await)
}
