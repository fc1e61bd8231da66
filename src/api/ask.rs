//! Query endpoints: ask, stats and the root banner

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::{GuardStats, ResponseRecord};
use crate::service::{GuardPipeline, LogSink};

/// Request body for `/ask`
#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    /// Free-text question; must not be blank
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusMessage {
    pub message: String,
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = StatusMessage)
    ),
    tag = "guard"
)]
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(StatusMessage {
        message: "AI Hallucination Guard Running".to_string(),
    })
}

/// Answer a query, verifying and correcting the draft when it is risky
#[utoipa::path(
    post,
    path = "/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Query processed", body = ResponseRecord),
        (status = 400, description = "Query is blank", body = crate::api::error::ErrorResponse)
    ),
    tag = "guard"
)]
#[post("/ask")]
pub async fn ask(
    pipeline: web::Data<GuardPipeline>,
    request: web::Json<AskRequest>,
) -> Result<web::Json<ResponseRecord>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let record = pipeline.run(&request.query).await;
    Ok(web::Json(record))
}

/// Aggregate statistics over all logged requests
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Statistics computed", body = GuardStats),
        (status = 500, description = "Log store failed", body = crate::api::error::ErrorResponse),
        (status = 502, description = "Log store unavailable", body = crate::api::error::ErrorResponse)
    ),
    tag = "guard"
)]
#[get("/stats")]
pub async fn stats(log_sink: web::Data<dyn LogSink>) -> Result<web::Json<GuardStats>, ApiError> {
    let stats = log_sink.stats().await?;
    Ok(web::Json(stats))
}

/// Configure query routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(ask).service(stats);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    use super::*;
    use crate::model::VerificationConfig;
    use crate::service::ClaimVerifier;
    use crate::service::monitoring::InMemoryLogSink;
    use crate::service::pipeline::tests::{
        ChannelSink, KeywordComparator, SentenceExtractor, StubGenerator, table,
    };

    fn pipeline_with_sink(sink: Arc<dyn LogSink>) -> Arc<GuardPipeline> {
        let source = table(&[
            ("Paris", "SUPPORTS Paris is the capital of France."),
            ("Berlin", "CONTRADICTS Berlin is the capital of Germany."),
        ]);
        let verifier = ClaimVerifier::new(
            source,
            Arc::new(KeywordComparator),
            &VerificationConfig::default(),
        );
        Arc::new(GuardPipeline::new(
            Arc::new(StubGenerator::new(
                "Paris is in France. Berlin is in Spain.",
                "Paris is in France. Berlin is in Germany.",
            )),
            Arc::new(SentenceExtractor),
            verifier,
            sink,
        ))
    }

    #[actix_web::test]
    async fn test_index_banner() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"message": "AI Hallucination Guard Running"}));
    }

    #[actix_web::test]
    async fn test_ask_returns_record() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink: Arc<dyn LogSink> = Arc::new(ChannelSink(tx));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(pipeline_with_sink(Arc::clone(&sink))))
                .app_data(web::Data::from(sink))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/ask")
            .set_json(json!({"query": "Where are Paris and Berlin?"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["user_query"], "Where are Paris and Berlin?");
        assert_eq!(body["draft_response"], "Paris is in France. Berlin is in Spain.");
        assert_eq!(body["extracted_claims"].as_array().unwrap().len(), 2);
        assert_eq!(body["verification_results"].as_array().unwrap().len(), 2);
        assert_eq!(body["risk_analysis"]["risk_level"], "Medium");
        assert_eq!(body["risk_analysis"]["risk_score"], 0.5);
        assert_eq!(
            body["corrected_response"],
            "Paris is in France. Berlin is in Germany."
        );
        assert!(body.get("warnings").is_none());

        let logged = rx.recv().await.unwrap();
        assert_eq!(logged.id.to_string(), body["id"].as_str().unwrap());
    }

    #[actix_web::test]
    async fn test_blank_query_is_rejected() {
        let sink: Arc<dyn LogSink> = Arc::new(InMemoryLogSink::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(pipeline_with_sink(Arc::clone(&sink))))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/ask")
            .set_json(json!({"query": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["request_id"].is_string());
    }

    #[actix_web::test]
    async fn test_stats_reflect_logged_records() {
        let sink = Arc::new(InMemoryLogSink::new());
        let pipeline = pipeline_with_sink(sink.clone());
        pipeline.run("Where are Paris and Berlin?").await;

        for _ in 0..100 {
            if sink.stats().await.unwrap().total_requests == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }

        let sink: Arc<dyn LogSink> = sink;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(sink))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_requests"], 1);
        assert_eq!(body["corrections_triggered"], 1);
        assert_eq!(body["total_claims"], 2);
        assert_eq!(body["verdicts"]["supported"], 1);
        assert_eq!(body["verdicts"]["contradicted"], 1);
        assert_eq!(body["risk_levels"]["medium"], 1);
    }
}
