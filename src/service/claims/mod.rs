//! Claim extraction service using LLM
//!
//! Splits a draft answer into ordered, self-contained claims.

use async_trait::async_trait;
use rig::client::CompletionClient;

use crate::model::Claim;
use crate::model::claims::ExtractedClaims;
use crate::service::claims::filters::normalize_claims;
use crate::service::claims::prompts::{EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt};
use crate::service::llm::{LlmClient, model_from_env};

pub mod error;
pub mod filters;
pub mod prompts;

pub use error::ClaimExtractionError;

/// Environment variable for claim extraction model (defaults to gpt-4o-mini if not set)
const ENV_CLAIM_EXTRACTION_MODEL: &str = "CLAIM_EXTRACTION_MODEL";

/// Turns draft text into an ordered list of claims
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    async fn extract(&self, draft: &str) -> Result<Vec<Claim>, ClaimExtractionError>;
}

/// Service for extracting claims from draft answers
pub struct LlmClaimExtractor {
    llm_client: LlmClient,
    model: String,
}

impl LlmClaimExtractor {
    /// Optionally uses CLAIM_EXTRACTION_MODEL env var
    pub fn new(llm_client: LlmClient) -> Self {
        let model = model_from_env(ENV_CLAIM_EXTRACTION_MODEL);
        tracing::info!(model = %model, "Claim extraction service initialized");
        Self { llm_client, model }
    }
}

#[async_trait]
impl ClaimExtractor for LlmClaimExtractor {
    async fn extract(&self, draft: &str) -> Result<Vec<Claim>, ClaimExtractionError> {
        if draft.trim().is_empty() {
            return Ok(vec![]);
        }

        let prompt = build_extraction_prompt(draft);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt_length,
            "Initiating OpenAI API call for claim extraction"
        );

        let start_time = std::time::Instant::now();

        // temperature=0.0 and a fixed seed keep extraction reproducible
        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<ExtractedClaims>(&self.model)
            .preamble(EXTRACTION_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        let extracted = match extractor.extract(&prompt).await {
            Ok(result) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    claims_extracted = result.claims.len(),
                    prompt_length = prompt_length,
                    "OpenAI API call completed successfully"
                );
                result
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "OpenAI API call failed"
                );
                return Err(ClaimExtractionError::ExtractionFailed(e.to_string()));
            }
        };

        let raw_count = extracted.claims.len();
        let claims = normalize_claims(extracted.claims);

        tracing::debug!(
            raw_claims = raw_count,
            final_claims = claims.len(),
            "Normalized extracted claims"
        );

        Ok(claims)
    }
}
