//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-facing notification produced by an engine transition.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Event type that triggered this notification
    /// (e.g. `"reservation_created"`, `"reservation_confirmed"`).
    pub event_type: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Additional structured data (JSON).
    pub payload: Option<serde_json::Value>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The recipient user.
    pub user_id: Uuid,
    /// Triggering event type.
    pub event_type: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Structured payload.
    pub payload: Option<serde_json::Value>,
}
