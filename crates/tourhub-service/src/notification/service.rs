//! Notification delivery and inbox management.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use tourhub_core::error::AppError;
use tourhub_core::types::pagination::{PageRequest, PageResponse};
use tourhub_database::repositories::notification::NotificationRepository;
use tourhub_entity::notification::{CreateNotification, Notification};

use crate::context::RequestContext;

/// Manages user notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Delivers a notification, best effort.
    ///
    /// A failed write is logged and swallowed so that the domain
    /// operation that triggered the notification always succeeds or
    /// fails on its own merits.
    pub async fn notify(&self, data: CreateNotification) {
        if let Err(e) = self.notif_repo.create(&data).await {
            warn!(
                user_id = %data.user_id,
                event_type = %data.event_type,
                error = %e,
                "Failed to deliver notification"
            );
        }
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notif_repo.find_by_user(ctx.user_id, page).await
    }

    /// Gets the unread notification count for the current user.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks one of the current user's notifications as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        self.notif_repo.mark_read(notification_id, ctx.user_id).await
    }

    /// Marks all of the current user's notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notif_repo.mark_all_read(ctx.user_id).await
    }
}
