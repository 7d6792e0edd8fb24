//! Route catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_entity::route::{CreateRoute, Route, RouteFilter, UpdateRoute};

use crate::dto::response::{ApiResponse, CapacityResponse, MessageResponse};
use crate::extractors::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

/// GET /api/routes
pub async fn list_routes(
    State(state): State<AppState>,
    OptionalAuthUser(ctx): OptionalAuthUser,
    Query(filter): Query<RouteFilter>,
) -> Result<Json<ApiResponse<Vec<Route>>>, AppError> {
    let routes = state.catalog.list_routes(ctx.as_ref(), &filter).await?;
    Ok(Json(ApiResponse::ok(routes)))
}

/// GET /api/routes/{id}
pub async fn get_route(
    State(state): State<AppState>,
    OptionalAuthUser(ctx): OptionalAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let route = state.catalog.get_route(ctx.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// GET /api/routes/{id}/capacity
pub async fn remaining_capacity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CapacityResponse>>, AppError> {
    let remaining = state.reservations.remaining_capacity(id).await?;
    Ok(Json(ApiResponse::ok(CapacityResponse { remaining })))
}

/// POST /api/routes
pub async fn create_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(data): Json<CreateRoute>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let route = state.catalog.create_route(&auth, data).await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// PUT /api/routes/{id}
pub async fn update_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateRoute>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let route = state.catalog.update_route(&auth, id, patch).await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// POST /api/routes/{id}/publish
pub async fn publish_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let route = state.catalog.publish_route(&auth, id).await?;
    Ok(Json(ApiResponse::ok(route)))
}

/// DELETE /api/routes/{id}
pub async fn delete_route(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.catalog.delete_route(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Route deleted".to_string(),
    })))
}
