// src/domain/directory.rs
//
// Narrow collaborator contracts. Users and unidades responsables are owned
// by subsystems outside this core; the assignment flow only needs to know
// whether a referenced row exists (and is not soft-deleted, for users).
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn exists(&self, user_id: i64) -> DomainResult<bool>;
}

#[async_trait]
pub trait UnidadDirectory: Send + Sync {
    async fn exists(&self, unidad_id: i64) -> DomainResult<bool>;
}
