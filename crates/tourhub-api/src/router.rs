//! Route definitions for the TourHub HTTP API.
//!
//! Routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tourhub_core::config::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(route_routes())
        .merge(reservation_routes())
        .merge(rating_routes())
        .merge(notification_routes())
        .merge(checkin_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Route catalog CRUD and publish.
fn route_routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(handlers::route::list_routes))
        .route("/routes", post(handlers::route::create_route))
        .route("/routes/{id}", get(handlers::route::get_route))
        .route("/routes/{id}", put(handlers::route::update_route))
        .route("/routes/{id}", delete(handlers::route::delete_route))
        .route("/routes/{id}/publish", post(handlers::route::publish_route))
        .route("/routes/{id}/capacity", get(handlers::route::remaining_capacity))
        .route(
            "/routes/{id}/reservations",
            get(handlers::reservation::list_for_route),
        )
        .route("/routes/{id}/ratings", get(handlers::rating::list_for_route))
}

/// Reservation lifecycle.
fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(handlers::reservation::create_reservation))
        .route("/reservations", get(handlers::reservation::list_all))
        .route("/reservations/mine", get(handlers::reservation::list_mine))
        .route(
            "/reservations/{id}/state",
            put(handlers::reservation::change_state),
        )
        .route(
            "/reservations/{id}/cancel",
            post(handlers::reservation::cancel_reservation),
        )
}

/// Ratings.
fn rating_routes() -> Router<AppState> {
    Router::new().route("/ratings", post(handlers::rating::create_rating))
}

/// Notification inbox.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route("/notifications/unread", get(handlers::notification::unread_count))
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Check-ins, nested under reservations.
fn checkin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations/{id}/checkins",
            post(handlers::checkin::create_checkin),
        )
        .route(
            "/reservations/{id}/checkins",
            get(handlers::checkin::list_checkins),
        )
}

/// Admin moderation and audit.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/suspend",
            post(handlers::admin::users::suspend_user),
        )
        .route(
            "/admin/users/{id}/restore",
            post(handlers::admin::users::restore_user),
        )
        .route(
            "/admin/users/{id}/validate-role",
            post(handlers::admin::users::validate_role),
        )
        .route(
            "/admin/routes/{id}/hide",
            post(handlers::admin::users::hide_route),
        )
        .route("/admin/audit-log", get(handlers::admin::audit::get_audit_log))
}

/// Health check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Builds a CORS tower layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    layer.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
