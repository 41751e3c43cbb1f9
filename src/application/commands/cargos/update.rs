// src/application/commands/cargos/update.rs
use super::{CargoCommandService, guard::ensure_admin};
use crate::{
    application::{
        dto::{AuthenticatedActor, CargoDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::NewAuditLog,
        cargo::{CargoNombre, CargoPatch},
        identity::validate_id,
    },
};
use serde_json::json;

pub struct UpdateCargoCommand {
    pub cargo_id: i64,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub activo: Option<bool>,
}

impl CargoCommandService {
    pub async fn update_cargo(
        &self,
        actor: &AuthenticatedActor,
        command: UpdateCargoCommand,
    ) -> ApplicationResult<CargoDto> {
        ensure_admin(actor)?;

        let cargo_id = validate_id(command.cargo_id, "cargo")?;

        let mut patch = CargoPatch::new(cargo_id);
        if let Some(nombre) = command.nombre {
            patch.nombre = Some(CargoNombre::new(nombre)?);
        }
        patch.descripcion = command.descripcion;
        patch.activo = command.activo;

        if patch.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let changed = patch.changed_fields();
        let updated = self.cargo_repo.update(patch).await?;

        self.audit
            .record(
                NewAuditLog::new("update_cargo")
                    .actor(actor.id)
                    .object("cargo", updated.id)
                    .ip(actor.ip_address.clone())
                    .metadata(json!({ "fields": changed })),
            )
            .await;

        Ok(updated.into())
    }
}
