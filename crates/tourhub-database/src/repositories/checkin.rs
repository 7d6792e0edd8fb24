//! Check-in repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_entity::checkin::Checkin;

/// Repository for append-only attendance records.
#[derive(Debug, Clone)]
pub struct CheckinRepository {
    pool: PgPool,
}

impl CheckinRepository {
    /// Create a new check-in repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a check-in record.
    pub async fn create(
        &self,
        reservation_id: Uuid,
        actor_id: Uuid,
        location: Option<&str>,
    ) -> AppResult<Checkin> {
        sqlx::query_as::<_, Checkin>(
            "INSERT INTO checkins (reservation_id, actor_id, location) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(reservation_id)
        .bind(actor_id)
        .bind(location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create check-in", e))
    }

    /// List check-ins for a reservation, oldest first.
    pub async fn find_by_reservation(&self, reservation_id: Uuid) -> AppResult<Vec<Checkin>> {
        sqlx::query_as::<_, Checkin>(
            "SELECT * FROM checkins WHERE reservation_id = $1 ORDER BY created_at ASC",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list check-ins", e))
    }
}
