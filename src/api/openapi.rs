//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::{ask, error, health};
use crate::model::{
    Claim, GuardStats, ResponseRecord, RiskAssessment, RiskLevel, RiskLevelCounts, Verdict,
    VerdictCounts, VerdictStatus,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Hallucination Guard",
        description = "Drafts answers with an LLM, verifies their factual claims against a reference source and corrects risky answers"
    ),
    paths(
        ask::index,
        ask::ask,
        ask::stats,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ask::AskRequest,
        ask::StatusMessage,
        error::ErrorResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth,
        ResponseRecord,
        Claim,
        Verdict,
        VerdictStatus,
        RiskAssessment,
        RiskLevel,
        GuardStats,
        RiskLevelCounts,
        VerdictCounts,
    )),
    tags(
        (name = "guard", description = "Answer verification"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
