// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, cargos, historial},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    AllowOrigin::list(origins)
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/v1/cargos",
            get(cargos::list_cargos).post(cargos::create_cargo),
        )
        .route("/api/v1/cargos/asignar", post(historial::assign_cargo))
        .route("/api/v1/cargos/desasignar", post(historial::unassign_cargo))
        .route(
            "/api/v1/cargos/{id}",
            get(cargos::get_cargo)
                .put(cargos::update_cargo)
                .delete(cargos::delete_cargo),
        )
        .route(
            "/api/v1/user_cargo_historial",
            get(historial::list_historial),
        )
        .route(
            "/api/v1/user_cargo_historial/{id}",
            get(historial::get_historial).patch(historial::update_historial),
        )
        .route("/api/v1/admin/audit_logs", get(audit::list_audit_logs))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
