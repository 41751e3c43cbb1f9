// src/domain/historial/entity.rs
use chrono::{DateTime, Utc};

/// One row of the user_cargo_historial ledger. A record with `fecha_fin`
/// still null is the active assignment for its (cargo, unidad) pair; once
/// closed it never reopens.
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    pub id: i64,
    pub cargo_id: i64,
    pub user_id: i64,
    pub unidad_responsable_id: i64,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_fin: Option<DateTime<Utc>>,
    pub asignado_por_user_id: Option<i64>,
    pub motivo: Option<String>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: DateTime<Utc>,
}

impl AssignmentRecord {
    pub fn is_active(&self) -> bool {
        self.fecha_fin.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub cargo_id: i64,
    pub user_id: i64,
    pub unidad_responsable_id: i64,
    pub asignado_por_user_id: Option<i64>,
    pub motivo: Option<String>,
    pub fecha_inicio: DateTime<Utc>,
}

/// Administrative correction. `fecha_fin` may move an existing close date
/// or close a record, but the service rejects clearing it back to null:
/// reopening would bypass the single-active-assignment check.
#[derive(Debug, Clone)]
pub struct AssignmentPatch {
    pub id: i64,
    pub motivo: Option<String>,
    pub fecha_fin: Option<DateTime<Utc>>,
}

impl AssignmentPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            motivo: None,
            fecha_fin: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.motivo.is_none() && self.fecha_fin.is_none()
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.motivo.is_some() {
            fields.push("motivo");
        }
        if self.fecha_fin.is_some() {
            fields.push("fecha_fin");
        }
        fields
    }
}

/// How an unassign call names its target: directly by record id, or by the
/// (cargo, unidad) pair whose unique active record should be closed.
#[derive(Debug, Clone, Copy)]
pub enum UnassignTarget {
    Record { hist_id: i64 },
    Pair { cargo_id: i64, unidad_id: i64 },
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub user_id: Option<i64>,
    pub cargo_id: Option<i64>,
    pub unidad_id: Option<i64>,
}
