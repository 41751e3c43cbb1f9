// src/application/queries/audit.rs
use std::sync::Arc;

use crate::application::dto::{AuditLogPageDto, AuthenticatedActor};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::queries::cargos::normalize_page;
use crate::domain::audit::{AuditLogFilter, AuditLogRepository};
use chrono::{DateTime, Utc};

pub struct ListAuditLogsQuery {
    pub actor_id: Option<i64>,
    pub object_type: Option<String>,
    pub action: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub skip: i64,
    pub limit: i64,
}

pub struct AuditQueryService {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedActor,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<AuditLogPageDto> {
        if !actor.is_admin() {
            return Err(ApplicationError::forbidden(
                "only administrators may read the audit log",
            ));
        }

        let filter = AuditLogFilter {
            actor_id: query.actor_id,
            object_type: query.object_type,
            action: query.action,
            start: query.start,
            end: query.end,
        };
        let (skip, limit) = normalize_page(query.skip, query.limit);

        let page = self.repo.query(filter, skip, limit).await?;
        Ok(page.into())
    }
}
