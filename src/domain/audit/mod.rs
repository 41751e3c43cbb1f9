pub mod entity;
pub mod repository;
pub mod sanitize;

pub use entity::{AuditLog, AuditLogFilter, AuditLogPage, NewAuditLog};
pub use repository::AuditLogRepository;
