use crate::application::{
    dto::AuthenticatedActor,
    error::{ApplicationError, ApplicationResult},
};

pub(super) fn ensure_admin(actor: &AuthenticatedActor) -> ApplicationResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(
            "only administrators may manage cargos",
        ))
    }
}
