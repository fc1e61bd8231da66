//! Claim verification against a knowledge source
//!
//! Each claim is looked up independently and judged by a pluggable
//! [`Comparator`]. Lookup failures, missing entries, comparator errors and
//! timeouts all degrade to an `Unverifiable` verdict instead of an error.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::model::{Claim, TopicStrategy, Verdict, VerificationConfig};
use crate::retriever::{KnowledgeSource, LookupOutcome};

pub mod comparator;
pub mod lexical;
pub mod prompts;
pub mod topic;

pub use comparator::{Comparator, ComparisonError, Judgment, LlmComparator};
pub use lexical::LexicalComparator;
pub use topic::derive_topic;

/// Verifies claims one at a time or a whole request's claims concurrently
pub struct ClaimVerifier {
    source: Arc<dyn KnowledgeSource>,
    comparator: Arc<dyn Comparator>,
    topic_strategy: TopicStrategy,
    max_concurrency: usize,
    claim_timeout: Duration,
}

impl ClaimVerifier {
    pub fn new(
        source: Arc<dyn KnowledgeSource>,
        comparator: Arc<dyn Comparator>,
        config: &VerificationConfig,
    ) -> Self {
        Self {
            source,
            comparator,
            topic_strategy: config.topic_strategy,
            max_concurrency: config.max_concurrency.max(1),
            claim_timeout: config.claim_timeout(),
        }
    }

    /// Verify a single claim
    pub async fn verify(&self, claim: &Claim) -> Verdict {
        let topic = derive_topic(&claim.text, self.topic_strategy);
        if topic.is_empty() {
            tracing::debug!(claim_index = claim.index, "Claim has no lookup topic");
            return Verdict::unverifiable(claim.clone());
        }

        let evidence = match self.source.lookup(&topic).await {
            LookupOutcome::Content(text) => text,
            LookupOutcome::Absent => {
                tracing::debug!(
                    claim_index = claim.index,
                    topic = %topic,
                    source = self.source.name(),
                    "No reference entry for claim"
                );
                return Verdict::unverifiable(claim.clone());
            }
            LookupOutcome::Failure(reason) => {
                tracing::warn!(
                    claim_index = claim.index,
                    topic = %topic,
                    source = self.source.name(),
                    reason = %reason,
                    "Reference lookup failed, marking claim unverifiable"
                );
                return Verdict::unverifiable(claim.clone());
            }
        };

        match self.comparator.compare(&claim.text, &evidence).await {
            Ok(judgment) => {
                tracing::debug!(
                    claim_index = claim.index,
                    topic = %topic,
                    status = ?judgment.status,
                    confidence = judgment.confidence,
                    "Claim judged"
                );
                Verdict {
                    claim: claim.clone(),
                    status: judgment.status,
                    confidence: judgment.confidence,
                    evidence,
                }
            }
            Err(e) => {
                tracing::warn!(
                    claim_index = claim.index,
                    error = %e,
                    "Comparison failed, marking claim unverifiable"
                );
                Verdict {
                    evidence,
                    ..Verdict::unverifiable(claim.clone())
                }
            }
        }
    }

    /// Verify all claims of a request
    ///
    /// At most `max_concurrency` claims are in flight. Verdicts come back in
    /// claim order, one per claim; a claim that exceeds the per-claim timeout
    /// is reported as unverifiable.
    pub async fn verify_all(&self, claims: &[Claim]) -> Vec<Verdict> {
        let start_time = std::time::Instant::now();

        let verdicts: Vec<Verdict> = stream::iter(claims)
            .map(|claim| self.verify_with_timeout(claim))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        tracing::info!(
            claims = claims.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Claim verification complete"
        );

        verdicts
    }

    async fn verify_with_timeout(&self, claim: &Claim) -> Verdict {
        match tokio::time::timeout(self.claim_timeout, self.verify(claim)).await {
            Ok(verdict) => verdict,
            Err(_) => {
                tracing::warn!(
                    claim_index = claim.index,
                    timeout_secs = self.claim_timeout.as_secs(),
                    "Claim verification timed out, marking claim unverifiable"
                );
                Verdict::unverifiable(claim.clone())
            }
        }
    }
}
