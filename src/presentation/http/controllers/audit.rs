// src/presentation/http/controllers/audit.rs
use crate::application::{dto::AuditLogPageDto, queries::audit::ListAuditLogsQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AuditListParams {
    pub actor_id: Option<i64>,
    pub object_type: Option<String>,
    pub action: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/audit_logs",
    responses(
        (status = 200, description = "Audit entries, newest first.", body = AuditLogPageDto),
        (status = 403, description = "Caller is not an administrator.")
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<AuditListParams>,
) -> HttpResult<Json<AuditLogPageDto>> {
    let page = state
        .services
        .audit_queries
        .list(
            &actor,
            ListAuditLogsQuery {
                actor_id: params.actor_id,
                object_type: params.object_type,
                action: params.action,
                start: params.start,
                end: params.end,
                skip: params.skip,
                limit: params.limit,
            },
        )
        .await
        .into_http()?;

    Ok(Json(page))
}
