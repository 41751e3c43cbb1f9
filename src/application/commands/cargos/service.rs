use std::sync::Arc;

use crate::application::audit::AuditRecorder;
use crate::application::ports::time::Clock;
use crate::domain::cargo::CargoRepository;

pub struct CargoCommandService {
    pub(super) cargo_repo: Arc<dyn CargoRepository>,
    pub(super) audit: AuditRecorder,
    pub(super) clock: Arc<dyn Clock>,
}

impl CargoCommandService {
    pub fn new(
        cargo_repo: Arc<dyn CargoRepository>,
        audit: AuditRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cargo_repo,
            audit,
            clock,
        }
    }
}
