//! Rating repository implementation.
//!
//! The insert and the route aggregate recomputation run in one
//! transaction so the catalog never shows a transiently wrong mean.

use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_entity::rating::Rating;
use tourhub_entity::route::model::DEFAULT_RATING;

/// Repository for ratings and route aggregate maintenance.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    /// Create a new rating repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the rating for a reservation, if one exists.
    pub async fn find_by_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Rating>> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE reservation_id = $1")
            .bind(reservation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find rating", e))
    }

    /// List all ratings for a route, newest first.
    pub async fn find_by_route(&self, route_id: Uuid) -> AppResult<Vec<Rating>> {
        sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE route_id = $1 ORDER BY created_at DESC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list ratings", e))
    }

    /// Insert a rating and recompute the route's aggregate atomically.
    ///
    /// A second rating for the same reservation trips the UNIQUE
    /// constraint and maps to a conflict.
    pub async fn create_and_recompute(
        &self,
        reservation_id: Uuid,
        tourist_id: Uuid,
        route_id: Uuid,
        score: i16,
        comment: Option<&str>,
    ) -> AppResult<Rating> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let rating = sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (reservation_id, tourist_id, route_id, score, comment) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(reservation_id)
        .bind(tourist_id)
        .bind(route_id)
        .bind(score)
        .bind(comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("ratings_reservation_id_key") =>
            {
                AppError::conflict("This reservation has already been rated")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create rating", e),
        })?;

        sqlx::query(
            "UPDATE routes SET \
                 rating = COALESCE((SELECT AVG(score)::DOUBLE PRECISION FROM ratings \
                                    WHERE route_id = $1), $2), \
                 review_count = (SELECT COUNT(*) FROM ratings WHERE route_id = $1), \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(route_id)
        .bind(DEFAULT_RATING)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to recompute route rating", e)
        })?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit rating", e))?;

        Ok(rating)
    }
}
