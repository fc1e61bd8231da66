//! Database models for response records

use sqlx::FromRow;

use crate::model::{GuardStats, RiskLevelCounts, VerdictCounts};

/// Aggregates over the `response_records` table
#[derive(Debug, Clone, FromRow)]
pub struct RecordTotalsRow {
    pub total_requests: i64,
    pub corrections_triggered: i64,
    pub average_risk_score: Option<f64>,
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub total_claims: i64,
}

/// Verdict status counts over every stored record
#[derive(Debug, Clone, FromRow)]
pub struct VerdictTotalsRow {
    pub supported: i64,
    pub contradicted: i64,
    pub unverifiable: i64,
}

/// Combine the two aggregate rows into the public stats shape
pub fn into_stats(totals: RecordTotalsRow, verdicts: VerdictTotalsRow) -> GuardStats {
    GuardStats {
        total_requests: non_negative(totals.total_requests),
        corrections_triggered: non_negative(totals.corrections_triggered),
        average_risk_score: totals.average_risk_score.unwrap_or(0.0),
        risk_levels: RiskLevelCounts {
            low: non_negative(totals.low),
            medium: non_negative(totals.medium),
            high: non_negative(totals.high),
        },
        total_claims: non_negative(totals.total_claims),
        verdicts: VerdictCounts {
            supported: non_negative(verdicts.supported),
            contradicted: non_negative(verdicts.contradicted),
            unverifiable: non_negative(verdicts.unverifiable),
        },
    }
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
