pub mod audit;
pub mod cargo;
pub mod directory;
pub mod errors;
pub mod historial;
pub mod identity;
