//! Entailment comparison between a claim and retrieved evidence

use async_trait::async_trait;
use rig::client::CompletionClient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::prompts::{COMPARISON_SYSTEM_PROMPT, build_comparison_prompt};
use crate::model::VerdictStatus;
use crate::service::llm::{LlmClient, model_from_env};

/// Environment variable for the comparator model
const ENV_COMPARATOR_MODEL: &str = "COMPARATOR_MODEL";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ComparisonError {
    #[error("LLM comparison failed: {0}")]
    ComparisonFailed(String),
}

/// A comparator's judgment of one claim against one evidence text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Judgment {
    pub status: VerdictStatus,
    /// Confidence in `status`, between 0.0 and 1.0
    pub confidence: f64,
}

impl Judgment {
    /// Clamp confidence into [0, 1]; non-finite values become 0.0
    pub fn sanitized(self) -> Self {
        let confidence = if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            status: self.status,
            confidence,
        }
    }
}

/// Decides whether evidence supports, contradicts, or says nothing about a claim
#[async_trait]
pub trait Comparator: Send + Sync {
    async fn compare(&self, claim: &str, evidence: &str) -> Result<Judgment, ComparisonError>;
}

/// Comparator that delegates the entailment judgment to the LLM
pub struct LlmComparator {
    llm_client: LlmClient,
    model: String,
}

impl LlmComparator {
    /// Optionally uses COMPARATOR_MODEL env var
    pub fn new(llm_client: LlmClient) -> Self {
        let model = model_from_env(ENV_COMPARATOR_MODEL);
        tracing::info!(model = %model, "LLM comparator initialized");
        Self { llm_client, model }
    }
}

#[async_trait]
impl Comparator for LlmComparator {
    async fn compare(&self, claim: &str, evidence: &str) -> Result<Judgment, ComparisonError> {
        let prompt = build_comparison_prompt(claim, evidence);
        let start_time = std::time::Instant::now();

        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<Judgment>(&self.model)
            .preamble(COMPARISON_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        match extractor.extract(&prompt).await {
            Ok(judgment) => {
                tracing::debug!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    status = ?judgment.status,
                    confidence = judgment.confidence,
                    "OpenAI comparison completed"
                );
                Ok(judgment.sanitized())
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI comparison failed"
                );
                Err(ComparisonError::ComparisonFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps_out_of_range() {
        let judgment = Judgment {
            status: VerdictStatus::Supported,
            confidence: 1.7,
        };
        assert_eq!(judgment.sanitized().confidence, 1.0);

        let judgment = Judgment {
            status: VerdictStatus::Contradicted,
            confidence: -0.2,
        };
        assert_eq!(judgment.sanitized().confidence, 0.0);
    }

    #[test]
    fn test_sanitized_replaces_nan() {
        let judgment = Judgment {
            status: VerdictStatus::Unverifiable,
            confidence: f64::NAN,
        };
        let sanitized = judgment.sanitized();
        assert_eq!(sanitized.confidence, 0.0);
        assert_eq!(sanitized.status, VerdictStatus::Unverifiable);
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let judgment = Judgment {
            status: VerdictStatus::Supported,
            confidence: 0.42,
        };
        assert_eq!(judgment.sanitized(), judgment);
    }
}
