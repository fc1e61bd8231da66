//! Error types for answer generation

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("LLM generation failed: {0}")]
    GenerationFailed(String),

    #[error("LLM returned an empty answer")]
    EmptyAnswer,
}
