//! Reservation handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_entity::reservation::{CreateReservation, Reservation};

use crate::dto::request::{CancelReservationRequest, ChangeStateRequest, CreateReservationRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let reservation = state
        .reservations
        .create_reservation(
            &auth,
            CreateReservation {
                tourist_id: auth.user_id,
                route_id: req.route_id,
                tour_date: req.tour_date,
                start_time: req.start_time,
                end_time: req.end_time,
                people_count: req.people_count,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(reservation)))
}

/// GET /api/reservations/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, AppError> {
    let reservations = state.reservations.list_mine(&auth).await?;
    Ok(Json(ApiResponse::ok(reservations)))
}

/// GET /api/reservations
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, AppError> {
    let reservations = state.reservations.list_all(&auth).await?;
    Ok(Json(ApiResponse::ok(reservations)))
}

/// GET /api/routes/{id}/reservations
pub async fn list_for_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(route_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, AppError> {
    let reservations = state.reservations.list_for_route(&auth, route_id).await?;
    Ok(Json(ApiResponse::ok(reservations)))
}

/// PUT /api/reservations/{id}/state
pub async fn change_state(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStateRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let reservation = state
        .reservations
        .change_state(&auth, id, req.state, req.reason)
        .await?;

    Ok(Json(ApiResponse::ok(reservation)))
}

/// POST /api/reservations/{id}/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CancelReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let reservation = state
        .reservations
        .cancel_reservation(&auth, id, req.reason)
        .await?;

    Ok(Json(ApiResponse::ok(reservation)))
}
