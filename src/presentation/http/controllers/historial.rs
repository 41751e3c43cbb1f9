// src/presentation/http/controllers/historial.rs
use crate::application::{
    commands::historial::{AssignCargoCommand, UnassignCargoCommand, UpdateAssignmentCommand},
    dto::{AssignmentRecordDto, UnassignResultDto},
    queries::historial::ListAssignmentsQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    pub cargo_id: i64,
    pub user_id: i64,
    pub unidad_responsable_id: i64,
    pub motivo: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UnassignRequest {
    pub hist_id: Option<i64>,
    pub cargo_id: Option<i64>,
    pub unidad_responsable_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAssignmentRequest {
    pub motivo: Option<String>,
    /// Absent means "leave unchanged"; an explicit null is an attempt to
    /// reopen the record and is rejected downstream.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub fecha_fin: Option<Option<DateTime<Utc>>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct HistorialListParams {
    pub user_id: Option<i64>,
    pub cargo_id: Option<i64>,
    pub unidad_responsable_id: Option<i64>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
}

#[utoipa::path(
    post,
    path = "/api/v1/cargos/asignar",
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Assignment opened.", body = AssignmentRecordDto),
        (status = 409, description = "The (cargo, unidad) pair already has an active assignment."),
        (status = 422, description = "Referenced cargo, user or unidad does not exist.")
    ),
    tag = "Historial"
)]
pub async fn assign_cargo(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(body): Json<AssignRequest>,
) -> HttpResult<Json<AssignmentRecordDto>> {
    let record = state
        .services
        .assignment_commands
        .assign(
            &actor,
            AssignCargoCommand {
                cargo_id: body.cargo_id,
                user_id: body.user_id,
                unidad_responsable_id: body.unidad_responsable_id,
                motivo: body.motivo,
            },
        )
        .await
        .into_http()?;

    Ok(Json(record))
}

#[utoipa::path(
    post,
    path = "/api/v1/cargos/desasignar",
    request_body = UnassignRequest,
    responses(
        (status = 200, description = "Assignment closed.", body = UnassignResultDto),
        (status = 404, description = "No active assignment matched the target.")
    ),
    tag = "Historial"
)]
pub async fn unassign_cargo(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(body): Json<UnassignRequest>,
) -> HttpResult<Json<UnassignResultDto>> {
    let result = state
        .services
        .assignment_commands
        .unassign(
            &actor,
            UnassignCargoCommand {
                hist_id: body.hist_id,
                cargo_id: body.cargo_id,
                unidad_responsable_id: body.unidad_responsable_id,
            },
        )
        .await
        .into_http()?;

    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/user_cargo_historial",
    responses((status = 200, description = "Assignment history.", body = [AssignmentRecordDto])),
    tag = "Historial"
)]
pub async fn list_historial(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<HistorialListParams>,
) -> HttpResult<Json<Vec<AssignmentRecordDto>>> {
    let records = state
        .services
        .assignment_queries
        .list(
            &actor,
            ListAssignmentsQuery {
                user_id: params.user_id,
                cargo_id: params.cargo_id,
                unidad_id: params.unidad_responsable_id,
                skip: params.skip,
                limit: params.limit,
            },
        )
        .await
        .into_http()?;

    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/v1/user_cargo_historial/{id}",
    responses(
        (status = 200, description = "Historial record.", body = AssignmentRecordDto),
        (status = 404, description = "No live record with that id.")
    ),
    tag = "Historial"
)]
pub async fn get_historial(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<AssignmentRecordDto>> {
    let record = state
        .services
        .assignment_queries
        .get(&actor, id)
        .await
        .into_http()?;

    Ok(Json(record))
}

#[utoipa::path(
    patch,
    path = "/api/v1/user_cargo_historial/{id}",
    request_body = UpdateAssignmentRequest,
    responses(
        (status = 200, description = "Record corrected.", body = AssignmentRecordDto),
        (status = 404, description = "No live record with that id.")
    ),
    tag = "Historial"
)]
pub async fn update_historial(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAssignmentRequest>,
) -> HttpResult<Json<AssignmentRecordDto>> {
    let record = state
        .services
        .assignment_commands
        .update_assignment(
            &actor,
            UpdateAssignmentCommand {
                hist_id: id,
                motivo: body.motivo,
                fecha_fin: body.fecha_fin,
            },
        )
        .await
        .into_http()?;

    Ok(Json(record))
}
