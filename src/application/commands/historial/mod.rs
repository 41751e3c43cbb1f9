mod assign;
mod guard;
mod service;
mod unassign;
mod update;

pub use assign::AssignCargoCommand;
pub use service::AssignmentCommandService;
pub use unassign::UnassignCargoCommand;
pub use update::UpdateAssignmentCommand;
