use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{auth::AuthUser, error::AppError, state::AppState};

const MISSING_AUTH: &str = "Authentication required";
const BAD_AUTH_FORMAT: &str = "Invalid authorization format. Use: Bearer <token>";

/// Extracts the token from `Authorization: Bearer <token>`. The header must
/// split on single spaces into exactly two parts.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized(MISSING_AUTH))?
        .to_str()
        .map_err(|_| AppError::unauthorized(BAD_AUTH_FORMAT))?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AppError::unauthorized(BAD_AUTH_FORMAT)),
    }
}

/// Verifies the bearer token and attaches the principal to the request.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;
    let claims = state.services.auth.verify_token(token)?;

    req.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(MISSING_AUTH))
    }
}
