//! Claims extracted from a draft answer

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single factual assertion taken from a draft answer.
///
/// `index` is the claim's position in the extraction output and is how
/// verdicts and risk assessments refer back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claim {
    pub index: usize,
    pub text: String,
}

impl Claim {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// LLM-extractable claim list
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedClaims {
    /// Self-contained factual statements, one per entry
    pub claims: Vec<String>,
}
