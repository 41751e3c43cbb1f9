// src/infrastructure/repositories/postgres_cargo.rs
use super::map_sqlx;
use crate::domain::cargo::{Cargo, CargoNombre, CargoPatch, CargoRepository, NewCargo};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, nombre, descripcion, activo, creado_en, actualizado_en";

#[derive(Clone)]
pub struct PostgresCargoRepository {
    pool: PgPool,
}

impl PostgresCargoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn build_update_query(patch: &CargoPatch) -> QueryBuilder<'_, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE cargos SET ");
        let mut first = true;

        if let Some(nombre) = patch.nombre.as_ref() {
            first = false;
            builder.push("nombre = ");
            builder.push_bind(nombre.as_str());
        }

        if let Some(descripcion) = patch.descripcion.as_ref() {
            if !first {
                builder.push(", ");
            }
            first = false;
            builder.push("descripcion = ");
            builder.push_bind(descripcion.as_str());
        }

        if let Some(activo) = patch.activo {
            if !first {
                builder.push(", ");
            }
            first = false;
            builder.push("activo = ");
            builder.push_bind(activo);
        }

        if !first {
            builder.push(", ");
        }
        builder.push("actualizado_en = NOW() WHERE id = ");
        builder.push_bind(patch.id);
        builder.push(" AND is_deleted = FALSE RETURNING ");
        builder.push(COLUMNS);

        builder
    }
}

#[derive(Debug, FromRow)]
struct CargoRow {
    id: i64,
    nombre: String,
    descripcion: Option<String>,
    activo: bool,
    creado_en: DateTime<Utc>,
    actualizado_en: DateTime<Utc>,
}

impl TryFrom<CargoRow> for Cargo {
    type Error = DomainError;

    fn try_from(row: CargoRow) -> Result<Self, Self::Error> {
        Ok(Cargo {
            id: row.id,
            nombre: CargoNombre::new(row.nombre)?,
            descripcion: row.descripcion,
            activo: row.activo,
            creado_en: row.creado_en,
            actualizado_en: row.actualizado_en,
        })
    }
}

#[async_trait]
impl CargoRepository for PostgresCargoRepository {
    async fn insert(&self, new_cargo: NewCargo) -> DomainResult<Cargo> {
        let row = sqlx::query_as::<_, CargoRow>(
            "INSERT INTO cargos (nombre, descripcion, creado_en, actualizado_en)
             VALUES ($1, $2, $3, $3)
             RETURNING id, nombre, descripcion, activo, creado_en, actualizado_en",
        )
        .bind(new_cargo.nombre.as_str())
        .bind(new_cargo.descripcion.as_deref())
        .bind(new_cargo.creado_en)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Cargo::try_from(row)
    }

    async fn update(&self, patch: CargoPatch) -> DomainResult<Cargo> {
        let mut builder = Self::build_update_query(&patch);

        let row = builder
            .build_query_as::<CargoRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("cargo not found".into()))?;

        Cargo::try_from(row)
    }

    /// The active-assignment check and the delete flip happen in one
    /// transaction holding the cargo row lock. An assign for this cargo
    /// takes the same lock, so it either commits before the check (and the
    /// delete conflicts) or blocks until the delete commits (and then fails
    /// its own existence re-check on the deleted row).
    async fn soft_delete(&self, id: i64) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let locked: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM cargos WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if locked.is_none() {
            return Err(DomainError::NotFound("cargo not found".into()));
        }

        let active: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM user_cargo_historial
                 WHERE cargo_id = $1 AND fecha_fin IS NULL AND is_deleted = FALSE
             )",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if active {
            return Err(DomainError::Conflict(
                "cargo has active assignments and cannot be deleted".into(),
            ));
        }

        sqlx::query("UPDATE cargos SET is_deleted = TRUE, actualizado_en = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Cargo>> {
        let row = sqlx::query_as::<_, CargoRow>(
            "SELECT id, nombre, descripcion, activo, creado_en, actualizado_en
             FROM cargos WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Cargo::try_from).transpose()
    }

    async fn find_by_nombre(&self, nombre: &CargoNombre) -> DomainResult<Option<Cargo>> {
        let row = sqlx::query_as::<_, CargoRow>(
            "SELECT id, nombre, descripcion, activo, creado_en, actualizado_en
             FROM cargos WHERE nombre = $1 AND is_deleted = FALSE",
        )
        .bind(nombre.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Cargo::try_from).transpose()
    }

    async fn list(&self, skip: i64, limit: i64) -> DomainResult<Vec<Cargo>> {
        let rows = sqlx::query_as::<_, CargoRow>(
            "SELECT id, nombre, descripcion, activo, creado_en, actualizado_en
             FROM cargos WHERE is_deleted = FALSE
             ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Cargo::try_from).collect()
    }
}
