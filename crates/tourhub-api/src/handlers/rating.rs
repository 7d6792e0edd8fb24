//! Rating handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_entity::rating::Rating;

use crate::dto::request::CreateRatingRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/ratings
pub async fn create_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRatingRequest>,
) -> Result<Json<ApiResponse<Rating>>, AppError> {
    let rating = state
        .ratings
        .create_rating(&auth, req.reservation_id, req.score, req.comment)
        .await?;

    Ok(Json(ApiResponse::ok(rating)))
}

/// GET /api/routes/{id}/ratings
pub async fn list_for_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(route_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Rating>>>, AppError> {
    let ratings = state.ratings.list_for_route(&auth, route_id).await?;
    Ok(Json(ApiResponse::ok(ratings)))
}
