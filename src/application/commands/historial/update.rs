// src/application/commands/historial/update.rs
use super::{AssignmentCommandService, guard::ensure_admin};
use crate::{
    application::{
        dto::{AssignmentRecordDto, AuthenticatedActor},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{audit::NewAuditLog, historial::AssignmentPatch, identity::validate_id},
};
use chrono::{DateTime, Utc};
use serde_json::json;

pub struct UpdateAssignmentCommand {
    pub hist_id: i64,
    pub motivo: Option<String>,
    /// Outer `None` leaves the close date unchanged; `Some(None)` is an
    /// explicit attempt to clear it and is rejected.
    pub fecha_fin: Option<Option<DateTime<Utc>>>,
}

impl AssignmentCommandService {
    /// Administrative correction of an existing ledger row. `fecha_fin` may
    /// be set or moved but never cleared back to null; reopening a record
    /// would bypass the single-active invariant check.
    pub async fn update_assignment(
        &self,
        actor: &AuthenticatedActor,
        command: UpdateAssignmentCommand,
    ) -> ApplicationResult<AssignmentRecordDto> {
        ensure_admin(actor)?;

        let hist_id = validate_id(command.hist_id, "historial")?;

        let mut patch = AssignmentPatch::new(hist_id);
        patch.motivo = command.motivo;
        patch.fecha_fin = match command.fecha_fin {
            Some(Some(fecha_fin)) => Some(fecha_fin),
            Some(None) => {
                return Err(ApplicationError::validation(
                    "fecha_fin cannot be cleared; reinstate with a new assignment",
                ));
            }
            None => None,
        };

        if patch.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let changed = patch.changed_fields();
        let updated = self.historial_repo.update(patch).await?;

        self.audit
            .record(
                NewAuditLog::new("update_user_cargo_historial")
                    .actor(actor.id)
                    .object("user_cargo_historial", updated.id)
                    .ip(actor.ip_address.clone())
                    .metadata(json!({ "fields": changed })),
            )
            .await;

        Ok(updated.into())
    }
}
