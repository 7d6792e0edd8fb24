//! Auth handlers: register, login, me.

use axum::Json;
use axum::extract::State;

use tourhub_core::error::AppError;
use tourhub_entity::user::User;
use tourhub_service::account::service::RegisterRequest;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, AuthResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let result = state.accounts.register(req).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: result.token.access_token,
        expires_at: result.token.expires_at,
        user: result.user,
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let result = state.accounts.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        access_token: result.token.access_token,
        expires_at: result.token.expires_at,
        user: result.user,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.accounts.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}
