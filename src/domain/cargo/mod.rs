pub mod entity;
pub mod repository;

pub use entity::{Cargo, CargoNombre, CargoPatch, NewCargo};
pub use repository::CargoRepository;
