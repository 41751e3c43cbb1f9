use std::sync::Arc;

use crate::application::audit::AuditRecorder;
use crate::application::ports::time::Clock;
use crate::domain::cargo::CargoRepository;
use crate::domain::directory::{UnidadDirectory, UserDirectory};
use crate::domain::historial::HistorialRepository;

/// Orchestrates assign/unassign over the ledger. The repository owns the
/// transaction and locking; this service does the fail-fast reference
/// checks, the role checks and the post-commit audit entries.
pub struct AssignmentCommandService {
    pub(super) historial_repo: Arc<dyn HistorialRepository>,
    pub(super) cargo_repo: Arc<dyn CargoRepository>,
    pub(super) users: Arc<dyn UserDirectory>,
    pub(super) unidades: Arc<dyn UnidadDirectory>,
    pub(super) audit: AuditRecorder,
    pub(super) clock: Arc<dyn Clock>,
}

impl AssignmentCommandService {
    pub fn new(
        historial_repo: Arc<dyn HistorialRepository>,
        cargo_repo: Arc<dyn CargoRepository>,
        users: Arc<dyn UserDirectory>,
        unidades: Arc<dyn UnidadDirectory>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            historial_repo,
            cargo_repo,
            users,
            unidades,
            audit,
            clock,
        }
    }
}
