//! Knowledge sources that supply reference text for claim verification

mod cached;
mod wikipedia;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use cached::CachedKnowledgeSource;
pub use wikipedia::WikipediaRetriever;

#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result of looking up a topic in a knowledge source
///
/// `Absent` means the source answered but had nothing for the topic;
/// `Failure` means the source could not be consulted at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    Content(String),
    Absent,
    Failure(String),
}

impl LookupOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupOutcome::Content(_) => "content",
            LookupOutcome::Absent => "absent",
            LookupOutcome::Failure(_) => "failure",
        }
    }
}

/// Trait for knowledge sources
///
/// Implementations never retry and never panic across this boundary:
/// transport problems come back as [`LookupOutcome::Failure`].
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Fetch a short plain-text summary for `topic`
    async fn lookup(&self, topic: &str) -> LookupOutcome;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
