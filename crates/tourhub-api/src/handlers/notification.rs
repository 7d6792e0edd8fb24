//! Notification inbox handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_core::types::pagination::PageResponse;
use tourhub_entity::notification::Notification;

use crate::dto::response::{ApiResponse, MessageResponse, UnreadCountResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, AppError> {
    let page = state
        .notifications
        .list_notifications(&auth, &params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/unread
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, AppError> {
    let unread = state.notifications.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(UnreadCountResponse { unread })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.notifications.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notification marked read".to_string(),
    })))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let updated = state.notifications.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("{updated} notification(s) marked read"),
    })))
}
