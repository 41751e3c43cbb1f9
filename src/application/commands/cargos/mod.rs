mod create;
mod delete;
mod guard;
mod service;
mod update;

pub use create::CreateCargoCommand;
pub use service::CargoCommandService;
pub use update::UpdateCargoCommand;
