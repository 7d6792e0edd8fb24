//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable audit log entry recording a privileged action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The user who performed the action (None for system actions such as
    /// the auto-close sweep).
    pub actor_id: Option<Uuid>,
    /// The action performed (e.g. `"reservation.create"`, `"user.suspend"`).
    pub action: String,
    /// The type of target entity (e.g. `"reservation"`, `"route"`, `"user"`).
    pub target_type: String,
    /// The target entity ID (if applicable).
    pub target_id: Option<Uuid>,
    /// Additional details about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The user who performed the action (None for system actions).
    pub actor_id: Option<Uuid>,
    /// The action performed.
    pub action: String,
    /// Target entity type.
    pub target_type: String,
    /// Target entity ID.
    pub target_id: Option<Uuid>,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
