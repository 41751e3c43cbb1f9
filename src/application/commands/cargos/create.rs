// src/application/commands/cargos/create.rs
use super::{CargoCommandService, guard::ensure_admin};
use crate::{
    application::{
        dto::{AuthenticatedActor, CargoDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::NewAuditLog,
        cargo::{CargoNombre, NewCargo},
    },
};
use serde_json::json;

pub struct CreateCargoCommand {
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl CargoCommandService {
    pub async fn create_cargo(
        &self,
        actor: &AuthenticatedActor,
        command: CreateCargoCommand,
    ) -> ApplicationResult<CargoDto> {
        ensure_admin(actor)?;

        let nombre = CargoNombre::new(command.nombre)?;

        if self.cargo_repo.find_by_nombre(&nombre).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "cargo '{nombre}' already exists"
            )));
        }

        let created = self
            .cargo_repo
            .insert(NewCargo {
                nombre,
                descripcion: command.descripcion,
                creado_en: self.clock.now(),
            })
            .await?;

        self.audit
            .record(
                NewAuditLog::new("create_cargo")
                    .actor(actor.id)
                    .object("cargo", created.id)
                    .ip(actor.ip_address.clone())
                    .metadata(json!({ "nombre": created.nombre.as_str() })),
            )
            .await;

        Ok(created.into())
    }
}
