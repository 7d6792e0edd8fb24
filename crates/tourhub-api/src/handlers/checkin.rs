//! Check-in handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_entity::checkin::Checkin;

use crate::dto::request::CreateCheckinRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/reservations/{id}/checkins
pub async fn create_checkin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(reservation_id): Path<Uuid>,
    Json(req): Json<CreateCheckinRequest>,
) -> Result<Json<ApiResponse<Checkin>>, AppError> {
    let checkin = state
        .checkins
        .create_checkin(&auth, reservation_id, req.location)
        .await?;

    Ok(Json(ApiResponse::ok(checkin)))
}

/// GET /api/reservations/{id}/checkins
pub async fn list_checkins(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Checkin>>>, AppError> {
    let checkins = state.checkins.list_checkins(&auth, reservation_id).await?;
    Ok(Json(ApiResponse::ok(checkins)))
}
