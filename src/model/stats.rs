//! Aggregate statistics over logged response records

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ResponseRecord, RiskLevel, VerdictStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskLevelCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VerdictCounts {
    pub supported: u64,
    pub contradicted: u64,
    pub unverifiable: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GuardStats {
    pub total_requests: u64,
    pub corrections_triggered: u64,
    /// Mean risk score over all requests, 0.0 when nothing was logged
    pub average_risk_score: f64,
    pub risk_levels: RiskLevelCounts,
    pub total_claims: u64,
    pub verdicts: VerdictCounts,
}

/// Running totals folded from one record at a time
///
/// Keeps only counters and the risk score sum, never the records themselves.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    stats: GuardStats,
    score_sum: f64,
}

impl StatsAccumulator {
    pub fn add(&mut self, record: &ResponseRecord) {
        let stats = &mut self.stats;

        stats.total_requests += 1;
        if record.corrected.is_some() {
            stats.corrections_triggered += 1;
        }
        self.score_sum += record.risk.risk_score;

        match record.risk.risk_level {
            RiskLevel::Low => stats.risk_levels.low += 1,
            RiskLevel::Medium => stats.risk_levels.medium += 1,
            RiskLevel::High => stats.risk_levels.high += 1,
        }

        stats.total_claims += record.claims.len() as u64;
        for verdict in &record.verdicts {
            match verdict.status {
                VerdictStatus::Supported => stats.verdicts.supported += 1,
                VerdictStatus::Contradicted => stats.verdicts.contradicted += 1,
                VerdictStatus::Unverifiable => stats.verdicts.unverifiable += 1,
            }
        }
    }

    /// Current totals, with the average computed over everything added so far
    pub fn snapshot(&self) -> GuardStats {
        let mut stats = self.stats.clone();
        if stats.total_requests > 0 {
            stats.average_risk_score = self.score_sum / stats.total_requests as f64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::model::{Claim, RiskAssessment, Verdict};

    fn record(level: RiskLevel, score: f64, statuses: &[VerdictStatus], corrected: bool) -> ResponseRecord {
        let claims: Vec<Claim> = (0..statuses.len())
            .map(|i| Claim::new(i, format!("claim {}", i)))
            .collect();
        let verdicts = claims
            .iter()
            .zip(statuses)
            .map(|(claim, status)| Verdict {
                claim: claim.clone(),
                status: *status,
                confidence: 0.5,
                evidence: String::new(),
            })
            .collect();

        ResponseRecord {
            id: Uuid::new_v4(),
            query: "q".to_string(),
            draft: "d".to_string(),
            claims,
            verdicts,
            risk: RiskAssessment {
                risk_level: level,
                risk_score: score,
                contributing_claims: vec![],
            },
            corrected: corrected.then(|| "fixed".to_string()),
            warnings: vec![],
            created_at: Utc::now(),
        }
    }

    fn totals(records: &[ResponseRecord]) -> GuardStats {
        let mut accumulator = StatsAccumulator::default();
        for record in records {
            accumulator.add(record);
        }
        accumulator.snapshot()
    }

    #[test]
    fn test_empty_stats() {
        let stats = totals(&[]);
        assert_eq!(stats, GuardStats::default());
        assert_eq!(stats.average_risk_score, 0.0);
    }

    #[test]
    fn test_counts_levels_verdicts_and_corrections() {
        let records = vec![
            record(RiskLevel::Low, 0.0, &[VerdictStatus::Supported], false),
            record(
                RiskLevel::High,
                1.0,
                &[VerdictStatus::Contradicted, VerdictStatus::Contradicted],
                true,
            ),
            record(
                RiskLevel::Medium,
                0.5,
                &[VerdictStatus::Unverifiable, VerdictStatus::Supported, VerdictStatus::Contradicted],
                true,
            ),
        ];

        let stats = totals(&records);

        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.corrections_triggered, 2);
        assert!((stats.average_risk_score - 0.5).abs() < 1e-9);
        assert_eq!(
            stats.risk_levels,
            RiskLevelCounts {
                low: 1,
                medium: 1,
                high: 1
            }
        );
        assert_eq!(stats.total_claims, 6);
        assert_eq!(
            stats.verdicts,
            VerdictCounts {
                supported: 2,
                contradicted: 3,
                unverifiable: 1
            }
        );
    }

    #[test]
    fn test_snapshot_tracks_running_average() {
        let mut accumulator = StatsAccumulator::default();
        accumulator.add(&record(RiskLevel::High, 1.0, &[], true));
        assert_eq!(accumulator.snapshot().average_risk_score, 1.0);

        accumulator.add(&record(RiskLevel::Low, 0.0, &[], false));
        let stats = accumulator.snapshot();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.average_risk_score, 0.5);
    }
}
