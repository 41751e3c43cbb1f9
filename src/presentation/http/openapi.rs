// src/presentation/http/openapi.rs
use crate::application::dto::{AssignmentRecordDto, AuditLogDto, AuditLogPageDto, CargoDto, UnassignResultDto};
use crate::presentation::http::controllers;
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        controllers::cargos::create_cargo,
        controllers::cargos::list_cargos,
        controllers::cargos::get_cargo,
        controllers::cargos::update_cargo,
        controllers::cargos::delete_cargo,
        controllers::historial::assign_cargo,
        controllers::historial::unassign_cargo,
        controllers::historial::list_historial,
        controllers::historial::get_historial,
        controllers::historial::update_historial,
        controllers::audit::list_audit_logs,
        super::routes::health
    ),
    components(schemas(
        StatusResponse,
        CargoDto,
        AssignmentRecordDto,
        UnassignResultDto,
        AuditLogDto,
        AuditLogPageDto,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Cargos", description = "Position catalog"),
        (name = "Historial", description = "Assignment ledger"),
        (name = "Audit", description = "Audit trail"),
        (name = "System", description = "Health and metadata")
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", openapi))
}
