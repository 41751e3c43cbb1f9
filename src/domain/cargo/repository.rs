// src/domain/cargo/repository.rs
use crate::domain::cargo::{Cargo, CargoNombre, CargoPatch, NewCargo};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// All reads are implicitly scoped to non-deleted rows; the soft-delete
/// predicate lives here and nowhere else.
#[async_trait]
pub trait CargoRepository: Send + Sync {
    async fn insert(&self, new_cargo: NewCargo) -> DomainResult<Cargo>;

    /// Applies the patch in a single statement; `NotFound` if the id does
    /// not match a live row.
    async fn update(&self, patch: CargoPatch) -> DomainResult<Cargo>;

    /// `NotFound` if absent or already deleted, `Conflict` if the cargo
    /// still has an active assignment in the ledger. The check and the flip
    /// are atomic: an assignment committing concurrently cannot slip in
    /// between them.
    async fn soft_delete(&self, id: i64) -> DomainResult<()>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Cargo>>;

    async fn find_by_nombre(&self, nombre: &CargoNombre) -> DomainResult<Option<Cargo>>;

    async fn list(&self, skip: i64, limit: i64) -> DomainResult<Vec<Cargo>>;
}
