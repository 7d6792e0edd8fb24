//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::info;

use tourhub_core::config::WorkerConfig;
use tourhub_core::error::AppError;
use tourhub_service::ReservationService;

use crate::jobs::autoclose;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Worker configuration.
    config: WorkerConfig,
    /// Reservation service for the expiry sweep.
    reservations: Arc<ReservationService>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Creates a new cron scheduler.
    pub async fn new(
        config: WorkerConfig,
        reservations: Arc<ReservationService>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            config,
            reservations,
        })
    }

    /// Registers all scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_auto_close().await?;

        info!("All scheduled tasks registered");
        Ok(())
    }

    /// Starts the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shuts the scheduler down.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }

    /// Reservation expiry sweep, on the configured cadence.
    async fn register_auto_close(&self) -> Result<(), AppError> {
        let cadence = self.config.auto_close_cron.clone();
        let reservations = Arc::clone(&self.reservations);

        let job = CronJob::new_async(cadence.as_str(), move |_uuid, _lock| {
            let reservations = Arc::clone(&reservations);
            Box::pin(async move {
                autoclose::run_auto_close(reservations).await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create auto_close schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add auto_close schedule: {e}")))?;

        info!(cadence = %cadence, "Registered: reservation auto_close");
        Ok(())
    }
}
