// src/application/commands/historial/assign.rs
use super::{AssignmentCommandService, guard::ensure_admin};
use crate::{
    application::{
        dto::{AssignmentRecordDto, AuthenticatedActor},
        error::ApplicationResult,
    },
    domain::{
        audit::NewAuditLog,
        errors::DomainError,
        historial::NewAssignment,
        identity::validate_id,
    },
};
use serde_json::json;

pub struct AssignCargoCommand {
    pub cargo_id: i64,
    pub user_id: i64,
    pub unidad_responsable_id: i64,
    pub motivo: Option<String>,
}

impl AssignmentCommandService {
    /// Opens a new active assignment for (cargo, unidad).
    ///
    /// References are validated before the transaction so that a bad
    /// request fails cheaply with zero writes. The repository re-validates
    /// cargo and unidad under row locks and enforces the single-active
    /// invariant; a concurrent assign for the same pair gets `Conflict`.
    pub async fn assign(
        &self,
        actor: &AuthenticatedActor,
        command: AssignCargoCommand,
    ) -> ApplicationResult<AssignmentRecordDto> {
        ensure_admin(actor)?;

        let cargo_id = validate_id(command.cargo_id, "cargo")?;
        let user_id = validate_id(command.user_id, "user")?;
        let unidad_id = validate_id(command.unidad_responsable_id, "unidad")?;

        if self.cargo_repo.find_by_id(cargo_id).await?.is_none() {
            return Err(DomainError::InvalidReference(format!(
                "cargo {cargo_id} does not exist"
            ))
            .into());
        }
        if !self.users.exists(user_id).await? {
            return Err(DomainError::InvalidReference(format!(
                "user {user_id} does not exist"
            ))
            .into());
        }
        if !self.unidades.exists(unidad_id).await? {
            return Err(DomainError::InvalidReference(format!(
                "unidad responsable {unidad_id} does not exist"
            ))
            .into());
        }

        let record = self
            .historial_repo
            .assign(NewAssignment {
                cargo_id,
                user_id,
                unidad_responsable_id: unidad_id,
                asignado_por_user_id: Some(actor.id),
                motivo: command.motivo,
                fecha_inicio: self.clock.now(),
            })
            .await?;

        self.audit
            .record(
                NewAuditLog::new("create_user_cargo_historial")
                    .actor(actor.id)
                    .object("user_cargo_historial", record.id)
                    .ip(actor.ip_address.clone())
                    .metadata(json!({
                        "cargo_id": record.cargo_id,
                        "user_id": record.user_id,
                        "unidad_responsable_id": record.unidad_responsable_id,
                    })),
            )
            .await;

        Ok(record.into())
    }
}
