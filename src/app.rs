//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use crate::db::repository::ResponseRecordRepository;
use crate::model::{
    ComparatorKind, Config, KnowledgeSourceConfig, LogStoreKind, VerificationConfig,
};
use crate::retriever::{CachedKnowledgeSource, KnowledgeSource, WikipediaRetriever};
use crate::service::{
    ClaimVerifier, Comparator, GuardPipeline, InMemoryLogSink, LexicalComparator,
    LlmAnswerGenerator, LlmClaimExtractor, LlmClient, LlmComparator, LogSink, LookupCache,
};

/// Application state shared by all handlers
pub struct AppState {
    /// The draft, verify and correct pipeline
    pub pipeline: Arc<GuardPipeline>,
    /// Where response records are logged; also serves `/stats`
    pub log_sink: Arc<dyn LogSink>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. LLM client initialization (requires OPENAI_API_KEY)
    /// 2. Knowledge source construction, optionally behind the Redis cache
    /// 3. Log store initialization (PostgreSQL schema when configured)
    /// 4. Pipeline construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::MissingConfig("OPENAI_API_KEY"))?;

        let llm_client = LlmClient::new(&api_key)
            .map_err(|_| AppError::InvalidConfig("Invalid OPENAI_API_KEY".to_string()))?;

        let source = Self::build_knowledge_source(&config.knowledge_source).await?;
        let comparator = Self::build_comparator(&config.verification, llm_client.clone());
        let log_sink = Self::build_log_sink(config.log_store).await?;

        let verifier = ClaimVerifier::new(source, comparator, &config.verification);

        let pipeline = GuardPipeline::new(
            Arc::new(LlmAnswerGenerator::new(llm_client.clone())),
            Arc::new(LlmClaimExtractor::new(llm_client)),
            verifier,
            Arc::clone(&log_sink),
        );

        Ok(Self {
            pipeline: Arc::new(pipeline),
            log_sink,
        })
    }

    /// Build the reference lookup, wrapped in the Redis cache when enabled
    async fn build_knowledge_source(
        config: &KnowledgeSourceConfig,
    ) -> Result<Arc<dyn KnowledgeSource>, AppError> {
        let retriever = WikipediaRetriever::new(config)
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        let retriever: Arc<dyn KnowledgeSource> = Arc::new(retriever);

        if !config.cache {
            return Ok(retriever);
        }

        // Redis is optional; lookups go straight to the source when it is down
        match LookupCache::new().await {
            Ok(cache) => {
                tracing::info!("Redis lookup cache enabled");
                Ok(Arc::new(CachedKnowledgeSource::new(retriever, cache)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis cache unavailable, running without cache");
                Ok(retriever)
            }
        }
    }

    fn build_comparator(config: &VerificationConfig, llm_client: LlmClient) -> Arc<dyn Comparator> {
        match config.comparator {
            ComparatorKind::Llm => Arc::new(LlmComparator::new(llm_client)),
            ComparatorKind::Lexical => {
                tracing::info!(
                    support_threshold = config.support_threshold,
                    "Using lexical comparator"
                );
                Arc::new(LexicalComparator::new(config.support_threshold))
            }
        }
    }

    async fn build_log_sink(kind: LogStoreKind) -> Result<Arc<dyn LogSink>, AppError> {
        match kind {
            LogStoreKind::Memory => Ok(Arc::new(InMemoryLogSink::new())),
            LogStoreKind::Postgres => {
                let db_pool = crate::db::create_pool()
                    .await
                    .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

                crate::db::init_schema(&db_pool)
                    .await
                    .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

                Ok(Arc::new(ResponseRecordRepository::new(db_pool)))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
