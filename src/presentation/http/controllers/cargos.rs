// src/presentation/http/controllers/cargos.rs
use crate::application::{
    commands::cargos::{CreateCargoCommand, UpdateCargoCommand},
    dto::CargoDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct CargoListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCargoRequest {
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCargoRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub activo: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/v1/cargos",
    request_body = CreateCargoRequest,
    responses(
        (status = 200, description = "Cargo created.", body = CargoDto),
        (status = 409, description = "A live cargo with that name already exists.")
    ),
    tag = "Cargos"
)]
pub async fn create_cargo(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(body): Json<CreateCargoRequest>,
) -> HttpResult<Json<CargoDto>> {
    let created = state
        .services
        .cargo_commands
        .create_cargo(
            &actor,
            CreateCargoCommand {
                nombre: body.nombre,
                descripcion: body.descripcion,
            },
        )
        .await
        .into_http()?;

    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/cargos",
    responses((status = 200, description = "Live cargos.", body = [CargoDto])),
    tag = "Cargos"
)]
pub async fn list_cargos(
    Extension(state): Extension<HttpState>,
    Authenticated(_actor): Authenticated,
    Query(params): Query<CargoListParams>,
) -> HttpResult<Json<Vec<CargoDto>>> {
    let cargos = state
        .services
        .cargo_queries
        .list(params.skip, params.limit)
        .await
        .into_http()?;

    Ok(Json(cargos))
}

#[utoipa::path(
    get,
    path = "/api/v1/cargos/{id}",
    responses(
        (status = 200, description = "Cargo found.", body = CargoDto),
        (status = 404, description = "No live cargo with that id.")
    ),
    tag = "Cargos"
)]
pub async fn get_cargo(
    Extension(state): Extension<HttpState>,
    Authenticated(_actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<CargoDto>> {
    let cargo = state.services.cargo_queries.get(id).await.into_http()?;
    Ok(Json(cargo))
}

#[utoipa::path(
    put,
    path = "/api/v1/cargos/{id}",
    request_body = UpdateCargoRequest,
    responses(
        (status = 200, description = "Cargo updated.", body = CargoDto),
        (status = 404, description = "No live cargo with that id.")
    ),
    tag = "Cargos"
)]
pub async fn update_cargo(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCargoRequest>,
) -> HttpResult<Json<CargoDto>> {
    let updated = state
        .services
        .cargo_commands
        .update_cargo(
            &actor,
            UpdateCargoCommand {
                cargo_id: id,
                nombre: body.nombre,
                descripcion: body.descripcion,
                activo: body.activo,
            },
        )
        .await
        .into_http()?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cargos/{id}",
    responses(
        (status = 200, description = "Cargo soft-deleted."),
        (status = 404, description = "No live cargo with that id."),
        (status = 409, description = "Cargo still has active assignments.")
    ),
    tag = "Cargos"
)]
pub async fn delete_cargo(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .cargo_commands
        .delete_cargo(&actor, id)
        .await
        .into_http()?;

    Ok(Json(serde_json::json!({ "message": "cargo eliminado" })))
}
