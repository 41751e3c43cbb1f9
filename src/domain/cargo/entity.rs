// src/domain/cargo/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::fmt;

/// Validated cargo name: non-empty, at most 80 characters (the column width
/// inherited from the original schema).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CargoNombre(String);

impl CargoNombre {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("cargo name cannot be empty".into()));
        }
        if trimmed.chars().count() > 80 {
            return Err(DomainError::Validation(
                "cargo name must be at most 80 characters long".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CargoNombre> for String {
    fn from(value: CargoNombre) -> Self {
        value.0
    }
}

impl fmt::Display for CargoNombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Cargo {
    pub id: i64,
    pub nombre: CargoNombre,
    pub descripcion: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCargo {
    pub nombre: CargoNombre,
    pub descripcion: Option<String>,
    pub creado_en: DateTime<Utc>,
}

/// Explicit partial-update payload: only the fields present are touched.
#[derive(Debug, Clone)]
pub struct CargoPatch {
    pub id: i64,
    pub nombre: Option<CargoNombre>,
    pub descripcion: Option<String>,
    pub activo: Option<bool>,
}

impl CargoPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            nombre: None,
            descripcion: None,
            activo: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.descripcion.is_none() && self.activo.is_none()
    }

    /// Names of the fields this patch touches, for audit metadata.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.nombre.is_some() {
            fields.push("nombre");
        }
        if self.descripcion.is_some() {
            fields.push("descripcion");
        }
        if self.activo.is_some() {
            fields.push("activo");
        }
        fields
    }
}
