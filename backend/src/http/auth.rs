//! Bearer token extractor for protected routes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::error::AppError;
use super::state::AppState;
use crate::api::PublicUser;
use crate::db::repository::UserRepository;

/// The authenticated caller.
///
/// Adding this as a handler argument makes the route require a valid
/// `Authorization: Bearer <token>` header whose subject still exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed Authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts)?;
        let claims = state.tokens.verify(token)?;

        match state.repository.get_user(claims.user_id()).await {
            Ok(user) => Ok(AuthUser(user.into())),
            Err(err) if err.is_not_found() => Err(AppError::Unauthorized(
                "Token subject no longer exists".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }
}
