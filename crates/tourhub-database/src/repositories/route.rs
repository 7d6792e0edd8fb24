//! Route repository implementation.
//!
//! Listing applies the role-scoped visibility predicate in SQL, with the
//! catalog filters AND-combined on top.

use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_entity::route::filter::RouteFilter;
use tourhub_entity::route::model::{CreateRoute, Route, UpdateRoute, DEFAULT_RATING};
use tourhub_entity::route::state::RouteState;
use tourhub_entity::user::UserRole;

/// Visibility scope for catalog listings, derived from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    /// Anonymous or tourist caller: published routes only.
    PublishedOnly,
    /// Host/guide caller: published routes plus their own non-deleted ones.
    PublishedOrOwned(Uuid),
    /// Admin caller: every route in every state.
    All,
}

impl RouteScope {
    /// Derive the scope from an optional authenticated caller.
    pub fn for_caller(caller: Option<(Uuid, UserRole)>) -> Self {
        match caller {
            None | Some((_, UserRole::Tourist)) => Self::PublishedOnly,
            Some((id, UserRole::Host | UserRole::Guide)) => Self::PublishedOrOwned(id),
            Some((_, UserRole::Admin)) => Self::All,
        }
    }
}

/// Repository for route CRUD and catalog queries.
#[derive(Debug, Clone)]
pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    /// Create a new route repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a route by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find route", e))
    }

    /// List routes visible under `scope`, narrowed by `filter`.
    pub async fn find_visible(
        &self,
        scope: RouteScope,
        filter: &RouteFilter,
    ) -> AppResult<Vec<Route>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        match scope {
            RouteScope::PublishedOnly => {
                conditions.push("state = 'published'".to_string());
            }
            RouteScope::PublishedOrOwned(_) => {
                conditions.push(format!(
                    "(state = 'published' OR (owner_id = ${param_idx} AND state <> 'deleted'))"
                ));
                param_idx += 1;
            }
            RouteScope::All => {}
        }

        if filter.destination.is_some() {
            conditions.push(format!("destination = ${param_idx}"));
            param_idx += 1;
        }
        if filter.max_price.is_some() {
            conditions.push(format!("price_per_person <= ${param_idx}"));
            param_idx += 1;
        }
        if filter.q.is_some() {
            conditions.push(format!(
                "(name ILIKE ${param_idx} OR description ILIKE ${param_idx} OR destination ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }
        if filter.tag.is_some() {
            conditions.push(format!("${param_idx} = ANY(tags)"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT * FROM routes {where_clause} ORDER BY created_at DESC");
        let mut query = sqlx::query_as::<_, Route>(&sql);

        if let RouteScope::PublishedOrOwned(owner_id) = scope {
            query = query.bind(owner_id);
        }
        if let Some(destination) = &filter.destination {
            query = query.bind(destination.clone());
        }
        if let Some(max_price) = filter.max_price {
            query = query.bind(max_price);
        }
        if let Some(q) = &filter.q {
            query = query.bind(format!("%{q}%"));
        }
        if let Some(tag) = &filter.tag {
            query = query.bind(tag.clone());
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list routes", e))
    }

    /// Create a new route in the draft state with the default rating.
    pub async fn create(&self, owner_id: Uuid, data: &CreateRoute) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            "INSERT INTO routes (name, description, destination, duration_hours, \
                                 price_per_person, max_capacity, rating, review_count, \
                                 owner_id, state, tags, points_of_interest, image_urls) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, 'draft', $9, $10, $11) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.destination)
        .bind(data.duration_hours)
        .bind(data.price_per_person)
        .bind(data.max_capacity)
        .bind(DEFAULT_RATING)
        .bind(owner_id)
        .bind(&data.tags)
        .bind(&data.points_of_interest)
        .bind(&data.image_urls)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create route", e))
    }

    /// Apply a partial update; `None` fields keep their current value.
    pub async fn update(&self, id: Uuid, patch: &UpdateRoute) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            "UPDATE routes SET name = COALESCE($2, name), \
                               description = COALESCE($3, description), \
                               destination = COALESCE($4, destination), \
                               duration_hours = COALESCE($5, duration_hours), \
                               price_per_person = COALESCE($6, price_per_person), \
                               max_capacity = COALESCE($7, max_capacity), \
                               tags = COALESCE($8, tags), \
                               points_of_interest = COALESCE($9, points_of_interest), \
                               image_urls = COALESCE($10, image_urls), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.destination)
        .bind(patch.duration_hours)
        .bind(patch.price_per_person)
        .bind(patch.max_capacity)
        .bind(&patch.tags)
        .bind(&patch.points_of_interest)
        .bind(&patch.image_urls)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update route", e))?
        .ok_or_else(|| AppError::not_found(format!("Route {id} not found")))
    }

    /// Set a route's lifecycle state.
    pub async fn set_state(&self, id: Uuid, state: RouteState) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            "UPDATE routes SET state = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(state)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set route state", e))?
        .ok_or_else(|| AppError::not_found(format!("Route {id} not found")))
    }

    /// Hide every route owned by a deactivated host; returns the count.
    pub async fn hide_by_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE routes SET state = 'hidden', updated_at = NOW() \
             WHERE owner_id = $1 AND state <> 'deleted'",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to hide routes by owner", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Soft-delete a route, refusing while pending or confirmed
    /// reservations exist. The reservation guard runs in the same
    /// statement as the update, so a booking landing concurrently
    /// blocks the delete instead of racing past it.
    pub async fn mark_deleted(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE routes SET state = 'deleted', updated_at = NOW() \
             WHERE id = $1 AND state <> 'deleted' \
               AND NOT EXISTS ( \
                   SELECT 1 FROM reservations r \
                   WHERE r.route_id = routes.id AND r.state IN ('pending', 'confirmed'))",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete route", e))?;
        Ok(result.rows_affected() > 0)
    }
}
