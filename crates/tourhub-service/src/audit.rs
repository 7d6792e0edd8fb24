//! Best-effort audit trail recording.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use tourhub_database::repositories::audit::AuditLogRepository;
use tourhub_entity::audit::CreateAuditLogEntry;

/// Writes audit log entries without letting a failed write break the
/// operation that triggered it.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    repo: Arc<AuditLogRepository>,
}

impl AuditRecorder {
    /// Creates a new recorder.
    pub fn new(repo: Arc<AuditLogRepository>) -> Self {
        Self { repo }
    }

    /// Records an audit entry. Failures are logged and swallowed.
    pub async fn record(
        &self,
        actor_id: Option<Uuid>,
        action: &str,
        target_type: &str,
        target_id: Option<Uuid>,
        details: Option<Value>,
    ) {
        let entry = CreateAuditLogEntry {
            actor_id,
            action: action.to_string(),
            target_type: target_type.to_string(),
            target_id,
            details,
        };

        if let Err(e) = self.repo.create(&entry).await {
            warn!(action, error = %e, "Failed to write audit log entry");
        }
    }
}
