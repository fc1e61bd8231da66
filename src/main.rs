use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod db;
mod model;
mod retriever;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    tracing::info!(
        endpoint = %config.knowledge_source.endpoint,
        comparator = ?config.verification.comparator,
        topic_strategy = ?config.verification.topic_strategy,
        log_store = ?config.log_store,
        "Loaded configuration"
    );

    let state = AppState::new(config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    let pipeline = web::Data::from(Arc::clone(&state.pipeline));
    let log_sink = web::Data::from(Arc::clone(&state.log_sink));

    tracing::info!("Starting AI Hallucination Guard on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(pipeline.clone())
            .app_data(log_sink.clone())
            .configure(api::ask::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
