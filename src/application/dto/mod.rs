pub mod audit;
pub mod auth;
pub mod cargos;
pub mod historial;

pub use audit::{AuditLogDto, AuditLogPageDto};
pub use auth::AuthenticatedActor;
pub use cargos::CargoDto;
pub use historial::{AssignmentRecordDto, UnassignResultDto};
