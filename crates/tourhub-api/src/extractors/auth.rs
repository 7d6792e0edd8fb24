//! `AuthUser` extractor. Pulls the JWT from the Authorization header,
//! validates it, and injects a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tourhub_core::error::AppError;
use tourhub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Like [`AuthUser`] but tolerates a missing header, for endpoints that
/// serve both anonymous and authenticated callers.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let value = header
        .to_str()
        .map_err(|_| AppError::authentication("Invalid Authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    Ok(Some(token))
}

fn decode_context(state: &AppState, token: &str) -> Result<RequestContext, AppError> {
    let claims = state.jwt_decoder.decode(token)?;
    Ok(RequestContext::new(claims.sub, claims.role, claims.name))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        Ok(AuthUser(decode_context(state, token)?))
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            // A present but invalid token is still an error.
            Some(token) => Ok(OptionalAuthUser(Some(decode_context(state, token)?))),
            None => Ok(OptionalAuthUser(None)),
        }
    }
}
