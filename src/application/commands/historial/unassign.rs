// src/application/commands/historial/unassign.rs
use super::{AssignmentCommandService, guard::ensure_admin};
use crate::{
    application::{
        dto::{AuthenticatedActor, UnassignResultDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::NewAuditLog,
        historial::UnassignTarget,
        identity::validate_id,
    },
};
use serde_json::json;

/// Target either by record id or by the (cargo, unidad) pair whose active
/// record should be closed. Exactly one form must be supplied.
pub struct UnassignCargoCommand {
    pub hist_id: Option<i64>,
    pub cargo_id: Option<i64>,
    pub unidad_responsable_id: Option<i64>,
}

impl UnassignCargoCommand {
    fn target(&self) -> ApplicationResult<UnassignTarget> {
        match (self.hist_id, self.cargo_id, self.unidad_responsable_id) {
            (Some(hist_id), None, None) => Ok(UnassignTarget::Record {
                hist_id: validate_id(hist_id, "historial")?,
            }),
            (None, Some(cargo_id), Some(unidad_id)) => Ok(UnassignTarget::Pair {
                cargo_id: validate_id(cargo_id, "cargo")?,
                unidad_id: validate_id(unidad_id, "unidad")?,
            }),
            _ => Err(ApplicationError::validation(
                "provide either hist_id or the (cargo_id, unidad_responsable_id) pair",
            )),
        }
    }
}

impl AssignmentCommandService {
    /// Closes an active assignment by setting `fecha_fin` to now. A record
    /// that is already closed counts as "no active record" and fails with
    /// `NotFound`; a duplicate unassign never silently succeeds.
    pub async fn unassign(
        &self,
        actor: &AuthenticatedActor,
        command: UnassignCargoCommand,
    ) -> ApplicationResult<UnassignResultDto> {
        ensure_admin(actor)?;

        let target = command.target()?;
        let closed = self
            .historial_repo
            .close(target, self.clock.now())
            .await?;

        self.audit
            .record(
                NewAuditLog::new("cargo_unassign")
                    .actor(actor.id)
                    .object("user_cargo_historial", closed.id)
                    .ip(actor.ip_address.clone())
                    .metadata(json!({
                        "cargo_id": closed.cargo_id,
                        "user_id": closed.user_id,
                    })),
            )
            .await;

        Ok(UnassignResultDto {
            message: "cargo desasignado".into(),
            hist_id: closed.id,
        })
    }
}
