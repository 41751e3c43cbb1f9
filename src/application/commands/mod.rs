pub mod cargos;
pub mod historial;
