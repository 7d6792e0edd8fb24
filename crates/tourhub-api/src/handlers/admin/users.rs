//! Admin user moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_core::types::pagination::PageResponse;
use tourhub_entity::route::Route;
use tourhub_entity::user::User;

use crate::dto::request::SuspendUserRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, AppError> {
    let page = state
        .moderation
        .list_users(&auth, &params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/admin/users/{id}/suspend
pub async fn suspend_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SuspendUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.moderation.suspend_user(&auth, id, req.reason).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/admin/users/{id}/restore
pub async fn restore_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.moderation.restore_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/admin/users/{id}/validate-role
pub async fn validate_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.moderation.validate_role(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/admin/routes/{id}/hide
pub async fn hide_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let route = state.moderation.hide_route(&auth, id).await?;
    Ok(Json(ApiResponse::ok(route)))
}
