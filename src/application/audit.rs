// src/application/audit.rs
use crate::domain::audit::repository::AuditLogRepository;
use crate::domain::audit::sanitize::sanitize_metadata;
use crate::domain::audit::{AuditLog, NewAuditLog};
use std::sync::Arc;
use tracing::warn;

/// Best-effort audit writer. Metadata is sanitized before insertion and any
/// storage failure is logged and swallowed: an audit write must never be
/// able to fail the business operation that triggered it.
#[derive(Clone)]
pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn record(&self, mut entry: NewAuditLog) -> Option<AuditLog> {
        if let Some(metadata) = entry.metadata.take() {
            entry.metadata = Some(sanitize_metadata(metadata));
        }

        match self.repo.insert(entry).await {
            Ok(log) => Some(log),
            Err(err) => {
                warn!(error = %err, "failed to write audit log");
                None
            }
        }
    }
}
