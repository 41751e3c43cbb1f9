// src/infrastructure/repositories/postgres_directory.rs
use super::map_sqlx;
use crate::domain::directory::{UnidadDirectory, UserDirectory};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn exists(&self, user_id: i64) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[derive(Clone)]
pub struct PostgresUnidadDirectory {
    pool: PgPool,
}

impl PostgresUnidadDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnidadDirectory for PostgresUnidadDirectory {
    async fn exists(&self, unidad_id: i64) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM unidades_responsables WHERE id_unidad = $1)",
        )
        .bind(unidad_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}
