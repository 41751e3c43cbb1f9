// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        audit::AuditRecorder,
        commands::{cargos::CargoCommandService, historial::AssignmentCommandService},
        ports::{identity::TokenAuthenticator, time::Clock},
        queries::{
            audit::AuditQueryService, cargos::CargoQueryService,
            historial::AssignmentQueryService,
        },
    },
    domain::{
        audit::AuditLogRepository,
        cargo::CargoRepository,
        directory::{UnidadDirectory, UserDirectory},
        historial::HistorialRepository,
    },
};

pub struct ApplicationServices {
    pub cargo_commands: Arc<CargoCommandService>,
    pub cargo_queries: Arc<CargoQueryService>,
    pub assignment_commands: Arc<AssignmentCommandService>,
    pub assignment_queries: Arc<AssignmentQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    token_authenticator: Arc<dyn TokenAuthenticator>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cargo_repo: Arc<dyn CargoRepository>,
        historial_repo: Arc<dyn HistorialRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        users: Arc<dyn UserDirectory>,
        unidades: Arc<dyn UnidadDirectory>,
        token_authenticator: Arc<dyn TokenAuthenticator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let audit = AuditRecorder::new(Arc::clone(&audit_repo));

        let cargo_commands = Arc::new(CargoCommandService::new(
            Arc::clone(&cargo_repo),
            audit.clone(),
            Arc::clone(&clock),
        ));

        let assignment_commands = Arc::new(AssignmentCommandService::new(
            Arc::clone(&historial_repo),
            Arc::clone(&cargo_repo),
            Arc::clone(&users),
            Arc::clone(&unidades),
            audit.clone(),
            Arc::clone(&clock),
        ));

        let cargo_queries = Arc::new(CargoQueryService::new(Arc::clone(&cargo_repo)));
        let assignment_queries =
            Arc::new(AssignmentQueryService::new(Arc::clone(&historial_repo)));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit_repo)));

        Self {
            cargo_commands,
            cargo_queries,
            assignment_commands,
            assignment_queries,
            audit_queries,
            token_authenticator,
        }
    }

    pub fn token_authenticator(&self) -> Arc<dyn TokenAuthenticator> {
        Arc::clone(&self.token_authenticator)
    }
}
