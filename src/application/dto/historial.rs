// src/application/dto/historial.rs
use crate::domain::historial::AssignmentRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentRecordDto {
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

impl From<AssignmentRecord> for AssignmentRecordDto {
    fn from(record: AssignmentRecord) -> Self {
        Self {
            id: record.id,
            cargo_id: record.cargo_id,
            user_id: record.user_id,
            unidad_responsable_id: record.unidad_responsable_id,
            fecha_inicio: record.fecha_inicio,
            fecha_fin: record.fecha_fin,
            asignado_por_user_id: record.asignado_por_user_id,
            motivo: record.motivo,
            creado_en: record.creado_en,
            actualizado_en: record.actualizado_en,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnassignResultDto {
    pub message: String,
    pub hist_id: i64,
}
