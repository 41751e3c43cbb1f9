// src/infrastructure/repositories/postgres_historial.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::historial::{
    AssignmentFilter, AssignmentPatch, AssignmentRecord, HistorialRepository, NewAssignment,
    UnassignTarget,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, cargo_id, user_id, unidad_responsable_id, fecha_inicio, fecha_fin, \
                       asignado_por_user_id, motivo, creado_en, actualizado_en";

#[derive(Clone)]
pub struct PostgresHistorialRepository {
    pool: PgPool,
}

impl PostgresHistorialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HistorialRow {
    id: i64,
    cargo_id: i64,
    user_id: i64,
    unidad_responsable_id: i64,
    fecha_inicio: DateTime<Utc>,
    fecha_fin: Option<DateTime<Utc>>,
    asignado_por_user_id: Option<i64>,
    motivo: Option<String>,
    creado_en: DateTime<Utc>,
    actualizado_en: DateTime<Utc>,
}

impl From<HistorialRow> for AssignmentRecord {
    fn from(row: HistorialRow) -> Self {
        AssignmentRecord {
            id: row.id,
            cargo_id: row.cargo_id,
            user_id: row.user_id,
            unidad_responsable_id: row.unidad_responsable_id,
            fecha_inicio: row.fecha_inicio,
            fecha_fin: row.fecha_fin,
            asignado_por_user_id: row.asignado_por_user_id,
            motivo: row.motivo,
            creado_en: row.creado_en,
            actualizado_en: row.actualizado_en,
        }
    }
}

#[async_trait]
impl HistorialRepository for PostgresHistorialRepository {
    /// Serializes concurrent assigns for one (cargo, unidad) pair through
    /// row locks on the cargo and unidad rows. The new ledger row does not
    /// exist yet, so those two rows act as the lock proxies: a second
    /// transaction for the same pair blocks here until the first commits,
    /// then sees its active record and fails the invariant check. Assigns
    /// for different pairs lock disjoint rows and never contend.
    async fn assign(&self, new: NewAssignment) -> DomainResult<AssignmentRecord> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Bounded wait so a stuck peer surfaces as a retryable error
        // (SQLSTATE 55P03) instead of hanging the request.
        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let cargo_locked: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM cargos WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(new.cargo_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if cargo_locked.is_none() {
            return Err(DomainError::InvalidReference(format!(
                "cargo {} does not exist",
                new.cargo_id
            )));
        }

        let unidad_locked: Option<i64> = sqlx::query_scalar(
            "SELECT id_unidad FROM unidades_responsables WHERE id_unidad = $1 FOR UPDATE",
        )
        .bind(new.unidad_responsable_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if unidad_locked.is_none() {
            return Err(DomainError::InvalidReference(format!(
                "unidad responsable {} does not exist",
                new.unidad_responsable_id
            )));
        }

        // Invariant check, valid only while the locks above are held.
        let active: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM user_cargo_historial
             WHERE cargo_id = $1 AND unidad_responsable_id = $2
               AND fecha_fin IS NULL AND is_deleted = FALSE",
        )
        .bind(new.cargo_id)
        .bind(new.unidad_responsable_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if active.is_some() {
            return Err(DomainError::Conflict(
                "cargo already has an active assignment for this unidad".into(),
            ));
        }

        // ux_cargo_unidad_activo backstops the check; map_sqlx turns a
        // 23505 on it into the same Conflict the explicit check produces.
        let row = sqlx::query_as::<_, HistorialRow>(
            "INSERT INTO user_cargo_historial
                 (cargo_id, user_id, unidad_responsable_id, fecha_inicio,
                  asignado_por_user_id, motivo, creado_en, actualizado_en)
             VALUES ($1, $2, $3, $4, $5, $6, $4, $4)
             RETURNING id, cargo_id, user_id, unidad_responsable_id, fecha_inicio, fecha_fin,
                       asignado_por_user_id, motivo, creado_en, actualizado_en",
        )
        .bind(new.cargo_id)
        .bind(new.user_id)
        .bind(new.unidad_responsable_id)
        .bind(new.fecha_inicio)
        .bind(new.asignado_por_user_id)
        .bind(new.motivo.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn close(
        &self,
        target: UnassignTarget,
        ended_at: DateTime<Utc>,
    ) -> DomainResult<AssignmentRecord> {
        // One conditional update: only an active, live row matches, so a
        // second unassign finds nothing and fails NotFound instead of
        // moving the close date.
        let row = match target {
            UnassignTarget::Record { hist_id } => {
                sqlx::query_as::<_, HistorialRow>(
                    "UPDATE user_cargo_historial
                     SET fecha_fin = $2, actualizado_en = $2
                     WHERE id = $1 AND fecha_fin IS NULL AND is_deleted = FALSE
                     RETURNING id, cargo_id, user_id, unidad_responsable_id, fecha_inicio, fecha_fin,
                               asignado_por_user_id, motivo, creado_en, actualizado_en",
                )
                .bind(hist_id)
                .bind(ended_at)
                .fetch_optional(&self.pool)
                .await
            }
            UnassignTarget::Pair { cargo_id, unidad_id } => {
                sqlx::query_as::<_, HistorialRow>(
                    "UPDATE user_cargo_historial
                     SET fecha_fin = $3, actualizado_en = $3
                     WHERE cargo_id = $1 AND unidad_responsable_id = $2
                       AND fecha_fin IS NULL AND is_deleted = FALSE
                     RETURNING id, cargo_id, user_id, unidad_responsable_id, fecha_inicio, fecha_fin,
                               asignado_por_user_id, motivo, creado_en, actualizado_en",
                )
                .bind(cargo_id)
                .bind(unidad_id)
                .bind(ended_at)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx)?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::NotFound("no active assignment to close".into()))
    }

    async fn update(&self, patch: AssignmentPatch) -> DomainResult<AssignmentRecord> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE user_cargo_historial SET ");
        let mut first = true;

        if let Some(motivo) = patch.motivo.as_ref() {
            first = false;
            builder.push("motivo = ");
            builder.push_bind(motivo.as_str());
        }

        if let Some(fecha_fin) = patch.fecha_fin {
            if !first {
                builder.push(", ");
            }
            first = false;
            builder.push("fecha_fin = ");
            builder.push_bind(fecha_fin);
        }

        if !first {
            builder.push(", ");
        }
        builder.push("actualizado_en = NOW() WHERE id = ");
        builder.push_bind(patch.id);
        builder.push(" AND is_deleted = FALSE RETURNING ");
        builder.push(COLUMNS);

        let row = builder
            .build_query_as::<HistorialRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("historial record not found".into()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AssignmentRecord>> {
        let row = sqlx::query_as::<_, HistorialRow>(
            "SELECT id, cargo_id, user_id, unidad_responsable_id, fecha_inicio, fecha_fin,
                    asignado_por_user_id, motivo, creado_en, actualizado_en
             FROM user_cargo_historial WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: AssignmentFilter,
        skip: i64,
        limit: i64,
    ) -> DomainResult<Vec<AssignmentRecord>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM user_cargo_historial WHERE is_deleted = FALSE"
        ));

        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ");
            builder.push_bind(user_id);
        }
        if let Some(cargo_id) = filter.cargo_id {
            builder.push(" AND cargo_id = ");
            builder.push_bind(cargo_id);
        }
        if let Some(unidad_id) = filter.unidad_id {
            builder.push(" AND unidad_responsable_id = ");
            builder.push_bind(unidad_id);
        }

        builder.push(" ORDER BY fecha_inicio DESC, id DESC OFFSET ");
        builder.push_bind(skip);
        builder.push(" LIMIT ");
        builder.push_bind(limit);

        let rows = builder
            .build_query_as::<HistorialRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
