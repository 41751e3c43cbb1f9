// src/application/dto/audit.rs
use crate::domain::audit::{AuditLog, AuditLogPage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    pub actor_id: Option<i64>,
    pub action: String,
    pub object_type: Option<String>,
    pub object_id: Option<i64>,
    pub success: bool,
    pub ip_address: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            actor_id: log.actor_id,
            action: log.action,
            object_type: log.object_type,
            object_id: log.object_id,
            success: log.success,
            ip_address: log.ip_address,
            metadata: log.metadata,
            created_at: log.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogPageDto {
    pub total: i64,
    pub items: Vec<AuditLogDto>,
}

impl From<AuditLogPage> for AuditLogPageDto {
    fn from(page: AuditLogPage) -> Self {
        Self {
            total: page.total,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}
