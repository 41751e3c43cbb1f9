// src/domain/audit/repository.rs
use crate::domain::audit::{AuditLog, AuditLogFilter, AuditLogPage, NewAuditLog};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, entry: NewAuditLog) -> DomainResult<AuditLog>;

    /// Entries ordered by `created_at` descending, with the total count of
    /// rows matching the filter.
    async fn query(
        &self,
        filter: AuditLogFilter,
        skip: i64,
        limit: i64,
    ) -> DomainResult<AuditLogPage>;
}
