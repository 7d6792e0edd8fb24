//! TourHub server: tour-booking marketplace backend.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use tourhub_core::config::AppConfig;
use tourhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("TOURHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initializes tracing from the logging configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TourHub v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&config.media.upload_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;

    tracing::info!("Connecting to database...");
    let db = tourhub_database::connection::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    tourhub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    let result = tourhub_api::run_server(config, db.pool().clone()).await;
    db.close().await;
    result
}
