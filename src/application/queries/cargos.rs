// src/application/queries/cargos.rs
use std::sync::Arc;

use crate::application::dto::CargoDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::cargo::CargoRepository;
use crate::domain::identity::validate_id;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

pub(crate) fn normalize_page(skip: i64, limit: i64) -> (i64, i64) {
    let skip = skip.max(0);
    let limit = if limit <= 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    };
    (skip, limit)
}

pub struct CargoQueryService {
    repo: Arc<dyn CargoRepository>,
}

impl CargoQueryService {
    pub fn new(repo: Arc<dyn CargoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, skip: i64, limit: i64) -> ApplicationResult<Vec<CargoDto>> {
        let (skip, limit) = normalize_page(skip, limit);
        let cargos = self.repo.list(skip, limit).await?;
        Ok(cargos.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, cargo_id: i64) -> ApplicationResult<CargoDto> {
        let cargo_id = validate_id(cargo_id, "cargo")?;
        self.repo
            .find_by_id(cargo_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("cargo {cargo_id} not found")))
    }
}
