//! Admin moderation: suspensions, role validation, route takedowns,
//! and audit log access.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_core::events::{DomainEvent, EventPayload, UserEvent};
use tourhub_core::types::pagination::{PageRequest, PageResponse};
use tourhub_database::repositories::audit::{AuditLogFilter, AuditLogRepository};
use tourhub_database::repositories::route::RouteRepository;
use tourhub_database::repositories::user::UserRepository;
use tourhub_entity::audit::AuditLogEntry;
use tourhub_entity::notification::CreateNotification;
use tourhub_entity::route::{Route, RouteState};
use tourhub_entity::user::User;

use crate::audit::AuditRecorder;
use crate::context::RequestContext;
use crate::events::EventBus;
use crate::guard::require_active_caller;
use crate::notification::NotificationService;

/// Admin-only moderation operations.
#[derive(Clone)]
pub struct ModerationService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Route repository, for takedowns.
    route_repo: Arc<RouteRepository>,
    /// Audit log repository, for the admin read path.
    audit_repo: Arc<AuditLogRepository>,
    /// Audit recorder for moderation actions themselves.
    audit: Arc<AuditRecorder>,
    /// Notification delivery.
    notifier: Arc<NotificationService>,
    /// Domain event bus.
    events: EventBus,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        route_repo: Arc<RouteRepository>,
        audit_repo: Arc<AuditLogRepository>,
        audit: Arc<AuditRecorder>,
        notifier: Arc<NotificationService>,
        events: EventBus,
    ) -> Self {
        Self {
            user_repo,
            route_repo,
            audit_repo,
            audit,
            notifier,
            events,
        }
    }

    /// Suspends a user account.
    ///
    /// Suspending a host or guide also deactivates them as an owner,
    /// which hides all their routes through the event listener.
    pub async fn suspend_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        reason: String,
    ) -> Result<User, AppError> {
        self.require_admin(ctx).await?;

        if reason.trim().is_empty() {
            return Err(AppError::validation("Suspension reason cannot be empty"));
        }
        if user_id == ctx.user_id {
            return Err(AppError::validation("You cannot suspend yourself"));
        }

        let target = self.load_user(user_id).await?;
        if target.is_suspended() {
            return Err(AppError::conflict("User is already suspended"));
        }

        let suspended = self
            .user_repo
            .suspend(user_id, &reason, ctx.request_time)
            .await?;

        info!(%user_id, "User suspended");

        self.notifier
            .notify(CreateNotification {
                user_id,
                event_type: "account.suspended".to_string(),
                title: "Account suspended".to_string(),
                message: format!("Your account has been suspended: {reason}"),
                payload: None,
            })
            .await;

        self.audit
            .record(
                Some(ctx.user_id),
                "user.suspend",
                "user",
                Some(user_id),
                Some(json!({ "reason": reason })),
            )
            .await;

        self.events.publish(DomainEvent::new(
            Some(ctx.user_id),
            EventPayload::User(UserEvent::Suspended {
                user_id,
                reason: reason.clone(),
            }),
        ));

        if suspended.role.is_staff() && !suspended.role.is_admin() {
            self.events.publish(DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::User(UserEvent::OwnerDeactivated { owner_id: user_id }),
            ));
        }

        Ok(suspended)
    }

    /// Lifts a suspension.
    ///
    /// Previously hidden routes stay hidden; the owner republishes them
    /// explicitly.
    pub async fn restore_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.require_admin(ctx).await?;

        let target = self.load_user(user_id).await?;
        if !target.is_suspended() {
            return Err(AppError::conflict("User is not suspended"));
        }

        let restored = self.user_repo.restore(user_id).await?;

        info!(%user_id, "User restored");

        self.notifier
            .notify(CreateNotification {
                user_id,
                event_type: "account.restored".to_string(),
                title: "Account restored".to_string(),
                message: "Your account has been restored".to_string(),
                payload: None,
            })
            .await;

        self.audit
            .record(Some(ctx.user_id), "user.restore", "user", Some(user_id), None)
            .await;

        self.events.publish(DomainEvent::new(
            Some(ctx.user_id),
            EventPayload::User(UserEvent::Restored { user_id }),
        ));

        Ok(restored)
    }

    /// Marks a host or guide account as validated.
    pub async fn validate_role(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.require_admin(ctx).await?;

        let target = self.load_user(user_id).await?;
        if !target.role.requires_validation() {
            return Err(AppError::validation(
                "Only host and guide roles require validation",
            ));
        }
        if target.role_validated {
            return Err(AppError::conflict("Role is already validated"));
        }

        let validated = self.user_repo.set_role_validated(user_id).await?;

        info!(%user_id, role = %validated.role, "Role validated");

        self.notifier
            .notify(CreateNotification {
                user_id,
                event_type: "account.role_validated".to_string(),
                title: "Role validated".to_string(),
                message: format!("Your {} role has been validated", validated.role),
                payload: None,
            })
            .await;

        self.audit
            .record(Some(ctx.user_id), "user.validate_role", "user", Some(user_id), None)
            .await;

        self.events.publish(DomainEvent::new(
            Some(ctx.user_id),
            EventPayload::User(UserEvent::RoleValidated { user_id }),
        ));

        Ok(validated)
    }

    /// Takes a route off the public catalog.
    pub async fn hide_route(&self, ctx: &RequestContext, route_id: Uuid) -> Result<Route, AppError> {
        self.require_admin(ctx).await?;

        let route = self
            .route_repo
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::not_found("Route not found"))?;
        if route.state == RouteState::Deleted {
            return Err(AppError::not_found("Route not found"));
        }

        let hidden = self.route_repo.set_state(route_id, RouteState::Hidden).await?;

        info!(%route_id, "Route hidden by moderation");

        self.notifier
            .notify(CreateNotification {
                user_id: route.owner_id,
                event_type: "route.hidden".to_string(),
                title: "Route hidden".to_string(),
                message: format!("'{}' was hidden by moderation", route.name),
                payload: Some(json!({ "route_id": route_id })),
            })
            .await;

        self.audit
            .record(Some(ctx.user_id), "route.hide", "route", Some(route_id), None)
            .await;

        Ok(hidden)
    }

    /// Lists user accounts, paginated.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.require_admin(ctx).await?;
        self.user_repo.find_all(page).await
    }

    /// Searches the audit log, most recent first.
    pub async fn get_audit_log(
        &self,
        ctx: &RequestContext,
        filter: &AuditLogFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<AuditLogEntry>, AppError> {
        self.require_admin(ctx).await?;
        self.audit_repo.search(filter, page).await
    }

    async fn require_admin(&self, ctx: &RequestContext) -> Result<User, AppError> {
        let caller = require_active_caller(&self.user_repo, ctx).await?;
        if !caller.role.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }
        Ok(caller)
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
