// src/application/queries/historial.rs
use std::sync::Arc;

use crate::application::dto::{AssignmentRecordDto, AuthenticatedActor};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::queries::cargos::normalize_page;
use crate::domain::historial::{AssignmentFilter, HistorialRepository};
use crate::domain::identity::validate_id;

pub struct ListAssignmentsQuery {
    pub user_id: Option<i64>,
    pub cargo_id: Option<i64>,
    pub unidad_id: Option<i64>,
    pub skip: i64,
    pub limit: i64,
}

pub struct AssignmentQueryService {
    repo: Arc<dyn HistorialRepository>,
}

impl AssignmentQueryService {
    pub fn new(repo: Arc<dyn HistorialRepository>) -> Self {
        Self { repo }
    }

    /// Non-administrators only see their own history: the query is forced
    /// onto their user id, and asking for someone else's is `Forbidden`.
    pub async fn list(
        &self,
        actor: &AuthenticatedActor,
        query: ListAssignmentsQuery,
    ) -> ApplicationResult<Vec<AssignmentRecordDto>> {
        let user_id = if actor.is_admin() {
            query.user_id
        } else {
            match query.user_id {
                Some(id) if id != actor.id => {
                    return Err(ApplicationError::forbidden(
                        "cannot read another user's cargo history",
                    ));
                }
                _ => Some(actor.id),
            }
        };

        let filter = AssignmentFilter {
            user_id,
            cargo_id: query.cargo_id,
            unidad_id: query.unidad_id,
        };
        let (skip, limit) = normalize_page(query.skip, query.limit);

        let records = self.repo.list(filter, skip, limit).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedActor,
        hist_id: i64,
    ) -> ApplicationResult<AssignmentRecordDto> {
        let hist_id = validate_id(hist_id, "historial")?;

        let record = self
            .repo
            .find_by_id(hist_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("historial record {hist_id} not found"))
            })?;

        if !actor.is_admin() && record.user_id != actor.id {
            return Err(ApplicationError::forbidden(
                "cannot read another user's cargo history",
            ));
        }

        Ok(record.into())
    }
}
