//! Draft and correction generation
//!
//! The generative model is an external collaborator; the pipeline only sees
//! the [`AnswerGenerator`] trait.

use async_trait::async_trait;
use rig::client::CompletionClient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::Verdict;
use crate::service::llm::{LlmClient, model_from_env};

pub mod error;
pub mod prompts;

pub use error::GenerationError;

use prompts::{
    CORRECTION_SYSTEM_PROMPT, DRAFT_SYSTEM_PROMPT, build_correction_prompt, build_draft_prompt,
};

/// Environment variable for the drafting/correction model
const ENV_GENERATION_MODEL: &str = "GENERATION_MODEL";

/// Produces draft answers and corrected answers
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Draft an answer to `query`
    async fn generate(&self, query: &str) -> Result<String, GenerationError>;

    /// Rewrite the answer to `query` given the verdicts on the draft's claims
    async fn regenerate(&self, query: &str, verdicts: &[Verdict])
    -> Result<String, GenerationError>;
}

/// LLM-extractable answer structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct GeneratedAnswer {
    answer: String,
}

/// Answer generator backed by the shared OpenAI client
pub struct LlmAnswerGenerator {
    llm_client: LlmClient,
    model: String,
}

impl LlmAnswerGenerator {
    /// Optionally uses GENERATION_MODEL env var (defaults to gpt-4o-mini)
    pub fn new(llm_client: LlmClient) -> Self {
        let model = model_from_env(ENV_GENERATION_MODEL);
        tracing::info!(model = %model, "Answer generator initialized");
        Self { llm_client, model }
    }

    async fn complete(
        &self,
        preamble: &str,
        prompt: &str,
        temperature: f64,
        purpose: &str,
    ) -> Result<String, GenerationError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model,
            purpose = purpose,
            prompt_length = prompt.len(),
            "Initiating OpenAI API call"
        );

        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<GeneratedAnswer>(&self.model)
            .preamble(preamble)
            .additional_params(serde_json::json!({ "temperature": temperature }))
            .build();

        match extractor.extract(prompt).await {
            Ok(result) => {
                tracing::info!(
                    model = %self.model,
                    purpose = purpose,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    answer_length = result.answer.len(),
                    "OpenAI API call completed successfully"
                );
                let answer = result.answer.trim().to_string();
                if answer.is_empty() {
                    return Err(GenerationError::EmptyAnswer);
                }
                Ok(answer)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    purpose = purpose,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI API call failed"
                );
                Err(GenerationError::GenerationFailed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(&self, query: &str) -> Result<String, GenerationError> {
        let prompt = build_draft_prompt(query);
        self.complete(DRAFT_SYSTEM_PROMPT, &prompt, 0.7, "draft").await
    }

    async fn regenerate(
        &self,
        query: &str,
        verdicts: &[Verdict],
    ) -> Result<String, GenerationError> {
        let prompt = build_correction_prompt(query, verdicts);
        self.complete(CORRECTION_SYSTEM_PROMPT, &prompt, 0.0, "correction")
            .await
    }
}
