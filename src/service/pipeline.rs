//! Request pipeline: draft, extract, verify, assess, correct, log
//!
//! Steps always run in this order. Correction is the only conditional step and
//! runs exactly when the assessed risk is Medium or High. Failures of external
//! collaborators degrade the record and add a warning; they never fail the
//! request.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::model::ResponseRecord;
use crate::service::claims::ClaimExtractor;
use crate::service::generation::AnswerGenerator;
use crate::service::monitoring::{LogSink, dispatch_record};
use crate::service::risk;
use crate::service::verification::ClaimVerifier;

/// Orchestrates one `/ask` request end to end
pub struct GuardPipeline {
    generator: Arc<dyn AnswerGenerator>,
    extractor: Arc<dyn ClaimExtractor>,
    verifier: ClaimVerifier,
    log_sink: Arc<dyn LogSink>,
}

impl GuardPipeline {
    pub fn new(
        generator: Arc<dyn AnswerGenerator>,
        extractor: Arc<dyn ClaimExtractor>,
        verifier: ClaimVerifier,
        log_sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            generator,
            extractor,
            verifier,
            log_sink,
        }
    }

    /// Run the full pipeline for a query and return the assembled record
    pub async fn run(&self, query: &str) -> ResponseRecord {
        let id = Uuid::new_v4();
        let start_time = std::time::Instant::now();
        let mut warnings = Vec::new();

        tracing::info!(id = %id, query_length = query.len(), "Processing query");

        // Step 1: Draft
        let draft = match self.generator.generate(query).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Draft generation failed");
                warnings.push(format!("draft generation failed: {}", e));
                String::new()
            }
        };

        // Step 2: Claims
        let claims = if draft.is_empty() {
            vec![]
        } else {
            match self.extractor.extract(&draft).await {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Claim extraction failed");
                    warnings.push(format!("claim extraction failed: {}", e));
                    vec![]
                }
            }
        };

        // Step 3: Verification
        let verdicts = self.verifier.verify_all(&claims).await;

        // Step 4: Risk
        let risk = risk::assess(&verdicts);

        tracing::info!(
            id = %id,
            claims = claims.len(),
            risk_level = %risk.risk_level,
            risk_score = risk.risk_score,
            contributing_claims = risk.contributing_claims.len(),
            "Risk assessed"
        );

        // Step 5: Correction
        let corrected = if risk.risk_level.requires_correction() {
            match self.generator.regenerate(query, &verdicts).await {
                Ok(answer) => Some(answer),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Answer correction failed");
                    warnings.push(format!("answer correction failed: {}", e));
                    None
                }
            }
        } else {
            None
        };

        let record = ResponseRecord {
            id,
            query: query.to_string(),
            draft,
            claims,
            verdicts,
            risk,
            corrected,
            warnings,
            created_at: Utc::now(),
        };

        // Step 6: Logging
        dispatch_record(Arc::clone(&self.log_sink), record.clone());

        tracing::info!(
            id = %id,
            elapsed_ms = start_time.elapsed().as_millis(),
            corrected = record.corrected.is_some(),
            "Query processed"
        );

        record
    }
}
