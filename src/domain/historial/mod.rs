pub mod entity;
pub mod repository;

pub use entity::{AssignmentFilter, AssignmentPatch, AssignmentRecord, NewAssignment, UnassignTarget};
pub use repository::HistorialRepository;
