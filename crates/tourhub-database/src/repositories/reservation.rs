//! Reservation repository implementation.
//!
//! Capacity accounting is derived, never cached: occupancy is the live sum
//! of `people_count` over confirmed reservations. Both admission points
//! (creation and the pending → confirmed transition) run inside a
//! transaction that locks the route row, so concurrent callers cannot race
//! past the capacity check.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_entity::reservation::model::{CreateReservation, Reservation};
use tourhub_entity::reservation::state::ReservationState;
use tourhub_entity::route::RouteState;

/// Route fields needed while holding the row lock.
#[derive(Debug, sqlx::FromRow)]
struct LockedRoute {
    max_capacity: i32,
    price_per_person: i64,
    state: RouteState,
}

/// Repository for reservation lifecycle operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reservation by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    /// List a tourist's reservations, newest first.
    pub async fn find_by_tourist(&self, tourist_id: Uuid) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE tourist_id = $1 ORDER BY created_at DESC",
        )
        .bind(tourist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list tourist reservations", e)
        })
    }

    /// List all reservations against a route.
    pub async fn find_by_route(&self, route_id: Uuid) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE route_id = $1 ORDER BY created_at DESC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list route reservations", e)
        })
    }

    /// List reservations against every route owned by a host.
    pub async fn find_by_route_owner(&self, owner_id: Uuid) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT r.* FROM reservations r \
             JOIN routes rt ON rt.id = r.route_id \
             WHERE rt.owner_id = $1 ORDER BY r.created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list owner reservations", e)
        })
    }

    /// List every reservation (admin/guide view).
    pub async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list reservations", e)
            })
    }

    /// Count reservations on a route that block deletion (pending or confirmed).
    pub async fn count_active_by_route(&self, route_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE route_id = $1 AND state IN ('pending', 'confirmed')",
        )
        .bind(route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active reservations", e)
        })
    }

    /// Remaining capacity on a route, derived from the live confirmed sum.
    pub async fn remaining_capacity(&self, route_id: Uuid) -> AppResult<i64> {
        let remaining: Option<i64> = sqlx::query_scalar(
            "SELECT rt.max_capacity - COALESCE(( \
                 SELECT SUM(r.people_count) FROM reservations r \
                 WHERE r.route_id = rt.id AND r.state = 'confirmed'), 0) \
             FROM routes rt WHERE rt.id = $1",
        )
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute remaining capacity", e)
        })?;

        remaining.ok_or_else(|| AppError::not_found(format!("Route {route_id} not found")))
    }

    /// Create a pending reservation, freezing the route's current price.
    ///
    /// The route-state check, capacity check, price capture, and insert
    /// happen atomically under a `FOR UPDATE` lock on the route row, so a
    /// concurrent delete or takedown cannot slip in between. `total_paid`
    /// is always recomputed here from the frozen price; any
    /// caller-supplied total is ignored upstream.
    pub async fn create_pending(&self, data: &CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.begin().await?;

        let route = Self::lock_route(&mut tx, data.route_id).await?;
        if route.state != RouteState::Published {
            return Err(AppError::validation("Route is not open for booking"));
        }

        let occupied = Self::confirmed_occupancy(&mut tx, data.route_id).await?;

        let remaining = route.max_capacity as i64 - occupied;
        if occupied + data.people_count as i64 > route.max_capacity as i64 {
            return Err(AppError::capacity_exceeded(remaining.max(0)));
        }

        let total_paid = route.price_per_person * data.people_count as i64;

        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (tourist_id, route_id, tour_date, start_time, end_time, \
                                       people_count, state, total_paid, frozen_price_per_person) \
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8) \
             RETURNING *",
        )
        .bind(data.tourist_id)
        .bind(data.route_id)
        .bind(data.tour_date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.people_count)
        .bind(total_paid)
        .bind(route.price_per_person)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert reservation", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reservation", e)
        })?;

        Ok(reservation)
    }

    /// Confirm a pending reservation, re-checking capacity under the route
    /// row lock. Pending reservations hold no capacity, so this is the
    /// admission point where overbooking must be impossible.
    pub async fn confirm(&self, reservation_id: Uuid) -> AppResult<Reservation> {
        let mut tx = self.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 FOR UPDATE",
        )
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock reservation", e))?
        .ok_or_else(|| AppError::not_found(format!("Reservation {reservation_id} not found")))?;

        reservation
            .state
            .validate_transition(ReservationState::Confirmed)?;

        let route = Self::lock_route(&mut tx, reservation.route_id).await?;
        let occupied = Self::confirmed_occupancy(&mut tx, reservation.route_id).await?;

        let remaining = route.max_capacity as i64 - occupied;
        if occupied + reservation.people_count as i64 > route.max_capacity as i64 {
            return Err(AppError::capacity_exceeded(remaining.max(0)));
        }

        let confirmed = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET state = 'confirmed' WHERE id = $1 RETURNING *",
        )
        .bind(reservation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to confirm reservation", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit confirmation", e)
        })?;

        Ok(confirmed)
    }

    /// Compare-and-set transition for non-capacity-gated targets
    /// (cancellation). The state guard in the WHERE clause makes
    /// concurrent transitions race-free: the loser sees zero rows.
    pub async fn transition(
        &self,
        reservation_id: Uuid,
        from: ReservationState,
        to: ReservationState,
    ) -> AppResult<Reservation> {
        from.validate_transition(to)?;

        let updated = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET state = $3 WHERE id = $1 AND state = $2 RETURNING *",
        )
        .bind(reservation_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition reservation", e)
        })?;

        match updated {
            Some(reservation) => Ok(reservation),
            // The guard failed: someone else moved the reservation first.
            None => {
                let current = self
                    .find_by_id(reservation_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(format!("Reservation {reservation_id} not found"))
                    })?;
                Err(AppError::invalid_transition(current.state, to))
            }
        }
    }

    /// Close every confirmed reservation whose end instant has passed.
    ///
    /// Idempotent: already-closed reservations no longer match the state
    /// guard, so re-running the sweep is a no-op.
    pub async fn close_due(&self, now: DateTime<Utc>) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET state = 'closed', auto_closed = TRUE \
             WHERE state = 'confirmed' \
               AND (tour_date + COALESCE(end_time, TIME '23:59:59')) AT TIME ZONE 'UTC' <= $1 \
             RETURNING *",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to close due reservations", e)
        })
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    /// Lock the route row for the duration of the transaction.
    async fn lock_route(
        tx: &mut Transaction<'_, Postgres>,
        route_id: Uuid,
    ) -> AppResult<LockedRoute> {
        sqlx::query_as::<_, LockedRoute>(
            "SELECT max_capacity, price_per_person, state FROM routes WHERE id = $1 FOR UPDATE",
        )
        .bind(route_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock route", e))?
        .ok_or_else(|| AppError::not_found(format!("Route {route_id} not found")))
    }

    /// Sum of `people_count` over confirmed reservations, inside the
    /// caller's transaction.
    async fn confirmed_occupancy(
        tx: &mut Transaction<'_, Postgres>,
        route_id: Uuid,
    ) -> AppResult<i64> {
        let occupied: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(people_count) FROM reservations \
             WHERE route_id = $1 AND state = 'confirmed'",
        )
        .bind(route_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum confirmed occupancy", e)
        })?;
        Ok(occupied.unwrap_or(0))
    }
}
