// src/domain/audit/entity.rs
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct AuditLog {
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

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub actor_id: Option<i64>,
    pub action: String,
    pub object_type: Option<String>,
    pub object_id: Option<i64>,
    pub success: bool,
    pub ip_address: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl NewAuditLog {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            actor_id: None,
            action: action.into(),
            object_type: None,
            object_id: None,
            success: true,
            ip_address: None,
            metadata: None,
        }
    }

    pub fn actor(mut self, actor_id: i64) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn object(mut self, object_type: impl Into<String>, object_id: i64) -> Self {
        self.object_type = Some(object_type.into());
        self.object_id = Some(object_id);
        self
    }

    pub fn ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub actor_id: Option<i64>,
    pub object_type: Option<String>,
    pub action: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct AuditLogPage {
    pub total: i64,
    pub items: Vec<AuditLog>,
}
