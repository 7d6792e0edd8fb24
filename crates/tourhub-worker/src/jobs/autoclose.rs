//! Reservation expiry sweep.

use std::sync::Arc;

use tracing::{error, info};

use tourhub_service::ReservationService;

/// Closes every confirmed reservation whose end instant has passed.
///
/// The underlying update is a single state-guarded statement, so
/// overlapping runs are harmless.
pub async fn run_auto_close(reservations: Arc<ReservationService>) {
    match reservations.close_due_reservations().await {
        Ok(closed) if closed.is_empty() => {
            info!("Reservation expiry sweep: nothing due");
        }
        Ok(closed) => {
            info!(closed = closed.len(), "Reservation expiry sweep completed");
        }
        Err(e) => {
            error!(error = %e, "Reservation expiry sweep failed");
        }
    }
}
