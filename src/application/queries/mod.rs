pub mod audit;
pub mod cargos;
pub mod historial;
