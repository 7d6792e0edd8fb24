//! Admin audit log handlers.

use axum::Json;
use axum::extract::{Query, State};

use tourhub_core::error::AppError;
use tourhub_core::types::pagination::PageResponse;
use tourhub_database::repositories::audit::AuditLogFilter;
use tourhub_entity::audit::AuditLogEntry;

use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/audit-log
pub async fn get_audit_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<AuditLogFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AuditLogEntry>>>, AppError> {
    let page = state
        .moderation
        .get_audit_log(&auth, &filter, &params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}
