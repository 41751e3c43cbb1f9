// src/domain/historial/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::historial::{
    AssignmentFilter, AssignmentPatch, AssignmentRecord, NewAssignment, UnassignTarget,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Append-only assignment ledger. Reads are scoped to non-deleted rows.
#[async_trait]
pub trait HistorialRepository: Send + Sync {
    /// Inserts a new active record for (cargo, unidad), enforcing the
    /// single-active-assignment invariant.
    ///
    /// Implementations must serialize concurrent calls for the same pair:
    /// the Postgres implementation locks the cargo and unidad rows in one
    /// transaction and checks for an existing active record while holding
    /// the locks. Errors:
    /// - `InvalidReference` if cargo/unidad vanished under the lock,
    /// - `Conflict` if the pair already has an active record,
    /// - `Unavailable` on lock timeout or deadlock (retryable).
    async fn assign(&self, new: NewAssignment) -> DomainResult<AssignmentRecord>;

    /// Closes the active record named by `target`, setting `fecha_fin` to
    /// `ended_at` in one conditional update. `NotFound` if no active record
    /// matches, which makes a duplicate unassign fail cleanly instead of
    /// double-closing.
    async fn close(
        &self,
        target: UnassignTarget,
        ended_at: DateTime<Utc>,
    ) -> DomainResult<AssignmentRecord>;

    async fn update(&self, patch: AssignmentPatch) -> DomainResult<AssignmentRecord>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AssignmentRecord>>;

    async fn list(
        &self,
        filter: AssignmentFilter,
        skip: i64,
        limit: i64,
    ) -> DomainResult<Vec<AssignmentRecord>>;
}
