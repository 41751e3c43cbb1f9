// src/application/dto/cargos.rs
use crate::domain::cargo::Cargo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CargoDto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

impl From<Cargo> for CargoDto {
    fn from(cargo: Cargo) -> Self {
        Self {
            id: cargo.id,
            nombre: cargo.nombre.into(),
            descripcion: cargo.descripcion,
            activo: cargo.activo,
            creado_en: cargo.creado_en,
            actualizado_en: cargo.actualizado_en,
        }
    }
}
