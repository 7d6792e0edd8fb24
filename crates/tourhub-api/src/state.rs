//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use tourhub_auth::{JwtDecoder, JwtEncoder};
use tourhub_core::config::AppConfig;
use tourhub_service::{
    AccountService, CatalogService, CheckinService, EventBus, ModerationService,
    NotificationService, RatingService, ReservationService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Domain event bus.
    pub events: EventBus,

    /// Registration, login, profile.
    pub accounts: Arc<AccountService>,
    /// Route catalog.
    pub catalog: Arc<CatalogService>,
    /// Reservation lifecycle.
    pub reservations: Arc<ReservationService>,
    /// Ratings.
    pub ratings: Arc<RatingService>,
    /// Moderation and audit access.
    pub moderation: Arc<ModerationService>,
    /// Notification inbox.
    pub notifications: Arc<NotificationService>,
    /// Check-in tracking.
    pub checkins: Arc<CheckinService>,
}
