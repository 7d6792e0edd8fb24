//! Route catalog: role-scoped listing, authoring, publishing, deletion.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use tourhub_core::config::MediaConfig;
use tourhub_core::error::AppError;
use tourhub_database::repositories::reservation::ReservationRepository;
use tourhub_database::repositories::route::{RouteRepository, RouteScope};
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::route::{CreateRoute, Route, RouteFilter, RouteState, UpdateRoute};

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::guard::require_active_caller;

/// Manages the route catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Route repository.
    route_repo: Arc<RouteRepository>,
    /// Reservation repository, for the active-reservation delete guard.
    reservation_repo: Arc<ReservationRepository>,
    /// User repository, for the suspension gate.
    user_repo: Arc<UserRepository>,
    /// Audit recorder.
    audit: Arc<AuditRecorder>,
    /// Local image storage settings.
    media: MediaConfig,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        route_repo: Arc<RouteRepository>,
        reservation_repo: Arc<ReservationRepository>,
        user_repo: Arc<UserRepository>,
        audit: Arc<AuditRecorder>,
        media: MediaConfig,
    ) -> Self {
        Self {
            route_repo,
            reservation_repo,
            user_repo,
            audit,
            media,
        }
    }

    /// Lists routes visible to the caller, with optional filters.
    ///
    /// Anonymous and tourist callers see published routes only; hosts and
    /// guides additionally see their own non-deleted routes; admins see
    /// everything.
    pub async fn list_routes(
        &self,
        ctx: Option<&RequestContext>,
        filter: &RouteFilter,
    ) -> Result<Vec<Route>, AppError> {
        let scope = RouteScope::for_caller(ctx.map(|c| (c.user_id, c.role)));
        self.route_repo.find_visible(scope, filter).await
    }

    /// Fetches one route, subject to the same visibility rules as listing.
    pub async fn get_route(
        &self,
        ctx: Option<&RequestContext>,
        route_id: Uuid,
    ) -> Result<Route, AppError> {
        let route = self
            .route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;

        let caller = ctx.map(|c| (c.role, route.owner_id == c.user_id));
        if !route.state.visible_to(caller) {
            return Err(AppError::not_found("Route not found"));
        }

        Ok(route)
    }

    /// Creates a route in the draft state, owned by the caller.
    pub async fn create_route(
        &self,
        ctx: &RequestContext,
        data: CreateRoute,
    ) -> Result<Route, AppError> {
        let caller = require_active_caller(&self.user_repo, ctx).await?;
        if !caller.role.can_manage_routes() {
            return Err(AppError::authorization("Only hosts can create routes"));
        }

        Self::validate_route_fields(&data)?;

        let route = self.route_repo.create(ctx.user_id, &data).await?;

        info!(route_id = %route.id, owner_id = %ctx.user_id, "Route created");
        self.audit
            .record(Some(ctx.user_id), "route.create", "route", Some(route.id), None)
            .await;

        Ok(route)
    }

    /// Applies a partial update to a route owned by the caller.
    pub async fn update_route(
        &self,
        ctx: &RequestContext,
        route_id: Uuid,
        patch: UpdateRoute,
    ) -> Result<Route, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;
        let route = self.load_owned(ctx, route_id).await?;

        if let Some(capacity) = patch.max_capacity {
            if capacity < 1 {
                return Err(AppError::validation("Capacity must be at least 1"));
            }
        }

        let updated = self.route_repo.update(route.id, &patch).await?;

        self.audit
            .record(Some(ctx.user_id), "route.update", "route", Some(route.id), None)
            .await;

        Ok(updated)
    }

    /// Publishes a draft or hidden route.
    pub async fn publish_route(&self, ctx: &RequestContext, route_id: Uuid) -> Result<Route, AppError> {
        require_active_caller(&self.user_repo, ctx).await?;
        let route = self.load_owned(ctx, route_id).await?;

        match route.state {
            RouteState::Draft | RouteState::Hidden => {}
            other => {
                return Err(AppError::validation(format!(
                    "Cannot publish a route in the {other} state"
                )));
            }
        }

        let published = self.route_repo.set_state(route.id, RouteState::Published).await?;

        info!(route_id = %route.id, "Route published");
        self.audit
            .record(Some(ctx.user_id), "route.publish", "route", Some(route.id), None)
            .await;

        Ok(published)
    }

    /// Soft-deletes a route owned by the caller.
    ///
    /// Rejected with a conflict while any reservation on the route is
    /// still pending or confirmed; the repository enforces the guard in
    /// the same statement as the delete. Locally stored images are
    /// released best-effort afterwards.
    pub async fn delete_route(&self, ctx: &RequestContext, route_id: Uuid) -> Result<(), AppError> {
        require_active_caller(&self.user_repo, ctx).await?;
        let route = self.load_owned(ctx, route_id).await?;

        if !self.route_repo.mark_deleted(route.id).await? {
            // The count here only shapes the error message.
            let active = self.reservation_repo.count_active_by_route(route.id).await?;
            if active > 0 {
                return Err(AppError::conflict(format!(
                    "Route has {active} active reservation(s)"
                )));
            }
            return Err(AppError::conflict("Route is already deleted"));
        }

        self.release_local_images(&route).await;

        info!(route_id = %route.id, "Route deleted");
        self.audit
            .record(Some(ctx.user_id), "route.delete", "route", Some(route.id), None)
            .await;

        Ok(())
    }

    /// Hides every non-deleted route belonging to a deactivated owner.
    ///
    /// Invoked from the event listener on `owner_deactivated`.
    pub async fn cascade_hide_owner_routes(&self, owner_id: Uuid) -> Result<u64, AppError> {
        let hidden = self.route_repo.hide_by_owner(owner_id).await?;

        self.audit
            .record(
                None,
                "route.cascade_hide",
                "user",
                Some(owner_id),
                Some(serde_json::json!({ "routes_hidden": hidden })),
            )
            .await;

        Ok(hidden)
    }

    /// Loads a route and checks that the caller owns it or is an admin.
    async fn load_owned(&self, ctx: &RequestContext, route_id: Uuid) -> Result<Route, AppError> {
        let route = self
            .route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;

        if route.state == RouteState::Deleted {
            return Err(AppError::not_found("Route not found"));
        }

        if !ctx.is_admin() && route.owner_id != ctx.user_id {
            return Err(AppError::authorization("You do not own this route"));
        }

        Ok(route)
    }

    fn validate_route_fields(data: &CreateRoute) -> Result<(), AppError> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Route name cannot be empty"));
        }
        if data.max_capacity < 1 {
            return Err(AppError::validation("Capacity must be at least 1"));
        }
        if data.price_per_person < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
        Ok(())
    }

    /// Deletes locally stored image files referenced by the route.
    ///
    /// Remote references are ignored; a failed removal is logged, never
    /// surfaced.
    async fn release_local_images(&self, route: &Route) {
        for url in &route.image_urls {
            let Some(file_name) = url.strip_prefix(&self.media.local_prefix) else {
                continue;
            };
            // Guard against references escaping the upload directory.
            if file_name.contains("..") || file_name.contains('/') {
                warn!(route_id = %route.id, url, "Skipping suspicious image reference");
                continue;
            }

            let path = Path::new(&self.media.upload_dir).join(file_name);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(route_id = %route.id, path = %path.display(), error = %e,
                    "Failed to release route image");
            }
        }
    }
}
