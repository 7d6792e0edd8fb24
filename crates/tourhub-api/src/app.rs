//! Application builder: wires repositories, services, worker, and the
//! HTTP server together.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use tourhub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use tourhub_core::config::AppConfig;
use tourhub_core::error::AppError;
use tourhub_database::repositories::audit::AuditLogRepository;
use tourhub_database::repositories::checkin::CheckinRepository;
use tourhub_database::repositories::notification::NotificationRepository;
use tourhub_database::repositories::rating::RatingRepository;
use tourhub_database::repositories::reservation::ReservationRepository;
use tourhub_database::repositories::route::RouteRepository;
use tourhub_database::repositories::user::UserRepository;
use tourhub_service::{
    AccountService, AuditRecorder, CatalogService, CheckinService, EventBus, ModerationService,
    NotificationService, RatingService, ReservationService, events,
};
use tourhub_worker::CronScheduler;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared application state from configuration and a pool.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let route_repo = Arc::new(RouteRepository::new(db_pool.clone()));
    let reservation_repo = Arc::new(ReservationRepository::new(db_pool.clone()));
    let rating_repo = Arc::new(RatingRepository::new(db_pool.clone()));
    let audit_repo = Arc::new(AuditLogRepository::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));
    let checkin_repo = Arc::new(CheckinRepository::new(db_pool.clone()));

    let hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let events = EventBus::new();
    let audit = Arc::new(AuditRecorder::new(Arc::clone(&audit_repo)));
    let notifications = Arc::new(NotificationService::new(Arc::clone(&notification_repo)));

    let accounts = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&hasher),
        Arc::clone(&jwt_encoder),
        &config.auth,
    ));

    let catalog = Arc::new(CatalogService::new(
        Arc::clone(&route_repo),
        Arc::clone(&reservation_repo),
        Arc::clone(&user_repo),
        Arc::clone(&audit),
        config.media.clone(),
    ));

    let reservations = Arc::new(ReservationService::new(
        Arc::clone(&reservation_repo),
        Arc::clone(&route_repo),
        Arc::clone(&user_repo),
        Arc::clone(&notifications),
        Arc::clone(&audit),
        events.clone(),
    ));

    let ratings = Arc::new(RatingService::new(
        Arc::clone(&rating_repo),
        Arc::clone(&reservation_repo),
        Arc::clone(&route_repo),
        Arc::clone(&user_repo),
        Arc::clone(&notifications),
        Arc::clone(&audit),
    ));

    let moderation = Arc::new(ModerationService::new(
        Arc::clone(&user_repo),
        Arc::clone(&route_repo),
        Arc::clone(&audit_repo),
        Arc::clone(&audit),
        Arc::clone(&notifications),
        events.clone(),
    ));

    let checkins = Arc::new(CheckinService::new(
        Arc::clone(&checkin_repo),
        Arc::clone(&reservation_repo),
        Arc::clone(&route_repo),
        Arc::clone(&user_repo),
        Arc::clone(&audit),
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        events,
        accounts,
        catalog,
        reservations,
        ratings,
        moderation,
        notifications,
        checkins,
    }
}

/// Runs the TourHub server with the given configuration and pool.
///
/// Starts the event listeners and, when enabled, the cron scheduler,
/// then serves HTTP until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let state = build_state(config, db_pool);

    events::spawn_catalog_listener(&state.events, Arc::clone(&state.catalog));

    let mut scheduler = if state.config.worker.enabled {
        let scheduler = CronScheduler::new(
            state.config.worker.clone(),
            Arc::clone(&state.reservations),
        )
        .await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        info!("Background scheduler disabled");
        None
    };

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "TourHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    info!("TourHub server shut down gracefully");
    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
