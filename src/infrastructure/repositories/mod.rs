// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_audit_log;
mod postgres_cargo;
mod postgres_directory;
mod postgres_historial;

pub use error::map_sqlx;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_cargo::PostgresCargoRepository;
pub use postgres_directory::{PostgresUnidadDirectory, PostgresUserDirectory};
pub use postgres_historial::PostgresHistorialRepository;
