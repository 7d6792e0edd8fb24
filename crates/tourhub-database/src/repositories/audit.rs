//! Audit log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use tourhub_core::error::{AppError, ErrorKind};
use tourhub_core::result::AppResult;
use tourhub_core::types::pagination::{PageRequest, PageResponse};
use tourhub_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};

/// Filters applied when searching the audit log.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AuditLogFilter {
    /// Restrict to a single actor.
    pub actor_id: Option<Uuid>,
    /// Restrict to an action kind.
    pub action: Option<String>,
    /// Restrict to a target entity type.
    pub target_type: Option<String>,
    /// Entries at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Entries at or before this instant.
    pub to: Option<DateTime<Utc>>,
}

/// Repository for append-only audit log entries.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an audit log entry.
    pub async fn create(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (actor_id, action, target_type, target_id, details) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(&data.action)
        .bind(&data.target_type)
        .bind(data.target_id)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e)
        })
    }

    /// Search the audit log, most recent first.
    pub async fn search(
        &self,
        filter: &AuditLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.actor_id.is_some() {
            conditions.push(format!("actor_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.action.is_some() {
            conditions.push(format!("action = ${param_idx}"));
            param_idx += 1;
        }
        if filter.target_type.is_some() {
            conditions.push(format!("target_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.from.is_some() {
            conditions.push(format!("created_at >= ${param_idx}"));
            param_idx += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("created_at <= ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM audit_log {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditLogEntry>(&select_sql);

        if let Some(actor_id) = filter.actor_id {
            count_query = count_query.bind(actor_id);
            select_query = select_query.bind(actor_id);
        }
        if let Some(action) = &filter.action {
            count_query = count_query.bind(action.clone());
            select_query = select_query.bind(action.clone());
        }
        if let Some(target_type) = &filter.target_type {
            count_query = count_query.bind(target_type.clone());
            select_query = select_query.bind(target_type.clone());
        }
        if let Some(from) = filter.from {
            count_query = count_query.bind(from);
            select_query = select_query.bind(from);
        }
        if let Some(to) = filter.to {
            count_query = count_query.bind(to);
            select_query = select_query.bind(to);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count audit entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
