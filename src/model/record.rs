use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Claim, RiskAssessment, Verdict};

/// Full trace of one `/ask` request
///
/// Field names on the wire follow the public response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResponseRecord {
    pub id: Uuid,
    #[serde(rename = "user_query")]
    pub query: String,
    #[serde(rename = "draft_response")]
    pub draft: String,
    #[serde(rename = "extracted_claims")]
    pub claims: Vec<Claim>,
    #[serde(rename = "verification_results")]
    pub verdicts: Vec<Verdict>,
    #[serde(rename = "risk_analysis")]
    pub risk: RiskAssessment,
    #[serde(
        rename = "corrected_response",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub corrected: Option<String>,
    /// Degraded steps, e.g. a failed draft generation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub created_at: DateTime<Utc>,
}
