// src/application/commands/cargos/delete.rs
use super::{CargoCommandService, guard::ensure_admin};
use crate::{
    application::{dto::AuthenticatedActor, error::ApplicationResult},
    domain::{audit::NewAuditLog, identity::validate_id},
};

impl CargoCommandService {
    /// Soft-deletes a cargo. A cargo that still has an active assignment in
    /// the ledger cannot be deleted; the repository checks this under the
    /// cargo row lock, atomically with the flip.
    pub async fn delete_cargo(
        &self,
        actor: &AuthenticatedActor,
        cargo_id: i64,
    ) -> ApplicationResult<()> {
        ensure_admin(actor)?;

        let cargo_id = validate_id(cargo_id, "cargo")?;

        self.cargo_repo.soft_delete(cargo_id).await?;

        self.audit
            .record(
                NewAuditLog::new("delete_cargo")
                    .actor(actor.id)
                    .object("cargo", cargo_id)
                    .ip(actor.ip_address.clone()),
            )
            .await;

        Ok(())
    }
}
