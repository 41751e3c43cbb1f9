// src/infrastructure/repositories/postgres_audit_log.rs
use super::map_sqlx;
use crate::domain::audit::repository::AuditLogRepository;
use crate::domain::audit::{AuditLog, AuditLogFilter, AuditLogPage, NewAuditLog};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AuditLogFilter) {
        if let Some(actor_id) = filter.actor_id {
            builder.push(" AND actor_id = ");
            builder.push_bind(actor_id);
        }
        if let Some(object_type) = filter.object_type.clone() {
            builder.push(" AND object_type = ");
            builder.push_bind(object_type);
        }
        if let Some(action) = filter.action.clone() {
            builder.push(" AND action = ");
            builder.push_bind(action);
        }
        if let Some(start) = filter.start {
            builder.push(" AND created_at >= ");
            builder.push_bind(start);
        }
        if let Some(end) = filter.end {
            builder.push(" AND created_at <= ");
            builder.push_bind(end);
        }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    actor_id: Option<i64>,
    action: String,
    object_type: Option<String>,
    object_id: Option<i64>,
    success: bool,
    ip_address: Option<String>,
    metadata: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLog {
    fn from(row: AuditLogRow) -> Self {
        AuditLog {
            id: row.id,
            actor_id: row.actor_id,
            action: row.action,
            object_type: row.object_type,
            object_id: row.object_id,
            success: row.success,
            ip_address: row.ip_address,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, entry: NewAuditLog) -> DomainResult<AuditLog> {
        let row = sqlx::query_as::<_, AuditLogRow>(
            "INSERT INTO audit_logs
                 (actor_id, action, object_type, object_id, success, ip_address, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, actor_id, action, object_type, object_id, success, ip_address,
                       metadata, created_at",
        )
        .bind(entry.actor_id)
        .bind(entry.action)
        .bind(entry.object_type)
        .bind(entry.object_id)
        .bind(entry.success)
        .bind(entry.ip_address)
        .bind(entry.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn query(
        &self,
        filter: AuditLogFilter,
        skip: i64,
        limit: i64,
    ) -> DomainResult<AuditLogPage> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM audit_logs WHERE TRUE");
        Self::push_filter(&mut count_builder, &filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, actor_id, action, object_type, object_id, success, ip_address, \
             metadata, created_at FROM audit_logs WHERE TRUE",
        );
        Self::push_filter(&mut builder, &filter);
        builder.push(" ORDER BY created_at DESC, id DESC OFFSET ");
        builder.push_bind(skip);
        builder.push(" LIMIT ");
        builder.push_bind(limit);

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(AuditLogPage {
            total,
            items: rows.into_iter().map(Into::into).collect(),
        })
    }
}
