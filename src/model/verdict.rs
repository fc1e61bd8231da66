use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Claim;

/// Outcome of checking one claim against retrieved evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, JsonSchema)]
pub enum VerdictStatus {
    Supported,
    Contradicted,
    Unverifiable,
}

impl VerdictStatus {
    /// Contribution of a verdict with this status to the request risk score
    pub fn risk_weight(self) -> f64 {
        match self {
            VerdictStatus::Contradicted => 1.0,
            VerdictStatus::Unverifiable => 0.5,
            VerdictStatus::Supported => 0.0,
        }
    }

    /// Whether a verdict with this status raises the risk of the answer
    pub fn elevates_risk(self) -> bool {
        !matches!(self, VerdictStatus::Supported)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub claim: Claim,
    pub status: VerdictStatus,
    /// Comparator confidence in [0, 1]
    pub confidence: f64,
    /// Reference text the claim was judged against (empty when nothing was retrieved)
    pub evidence: String,
}

impl Verdict {
    /// Verdict for a claim that could not be checked
    pub fn unverifiable(claim: Claim) -> Self {
        Self {
            claim,
            status: VerdictStatus::Unverifiable,
            confidence: 0.0,
            evidence: String::new(),
        }
    }
}
