//! Hallucination risk aggregation
//!
//! Turns the per-claim verdicts of one request into a single score and level.
//! Weights: Contradicted 1.0, Unverifiable 0.5, Supported 0.0. The score is the
//! mean weight, so it always lies in [0, 1].
//!
//! Level boundaries are inclusive at the upper end of each band:
//! `score <= 0.33` is Low, `score <= 0.66` is Medium, anything above is High.

use crate::model::{RiskAssessment, RiskLevel, Verdict};

/// Highest score still classified as Low
pub const LOW_RISK_MAX: f64 = 0.33;
/// Highest score still classified as Medium
pub const MEDIUM_RISK_MAX: f64 = 0.66;

/// Aggregate verdicts into a risk assessment
///
/// Pure and deterministic: the same verdicts always give the same assessment.
pub fn assess(verdicts: &[Verdict]) -> RiskAssessment {
    let total_weight: f64 = verdicts.iter().map(|v| v.status.risk_weight()).sum();
    let risk_score = total_weight / verdicts.len().max(1) as f64;

    let contributing_claims = verdicts
        .iter()
        .filter(|v| v.status.elevates_risk())
        .map(|v| v.claim.clone())
        .collect();

    RiskAssessment {
        risk_level: classify(risk_score),
        risk_score,
        contributing_claims,
    }
}

/// Map a risk score onto its level
pub fn classify(risk_score: f64) -> RiskLevel {
    if risk_score <= LOW_RISK_MAX {
        RiskLevel::Low
    } else if risk_score <= MEDIUM_RISK_MAX {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Claim, VerdictStatus};

    fn verdicts(statuses: &[VerdictStatus]) -> Vec<Verdict> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Verdict {
                claim: Claim::new(i, format!("claim {}", i)),
                status: *status,
                confidence: 0.7,
                evidence: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_verdicts_are_low() {
        let assessment = assess(&[]);
        assert_eq!(assessment.risk_score, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.contributing_claims.is_empty());
    }

    #[test]
    fn test_all_supported_is_low() {
        let assessment = assess(&verdicts(&[VerdictStatus::Supported; 5]));
        assert_eq!(assessment.risk_score, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.contributing_claims.is_empty());
    }

    #[test]
    fn test_all_contradicted_is_high() {
        let input = verdicts(&[VerdictStatus::Contradicted; 3]);
        let assessment = assess(&input);
        assert_eq!(assessment.risk_score, 1.0);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.contributing_claims.len(), 3);
    }

    #[test]
    fn test_mixed_verdicts() {
        let input = verdicts(&[
            VerdictStatus::Supported,
            VerdictStatus::Contradicted,
            VerdictStatus::Supported,
            VerdictStatus::Unverifiable,
        ]);
        let assessment = assess(&input);

        assert_eq!(assessment.risk_score, 0.375);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(
            assessment.contributing_claims,
            vec![input[1].claim.clone(), input[3].claim.clone()]
        );
    }

    #[test]
    fn test_all_unverifiable_is_medium() {
        let assessment = assess(&verdicts(&[VerdictStatus::Unverifiable; 4]));
        assert_eq!(assessment.risk_score, 0.5);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_one_unverifiable_in_three_is_medium() {
        // 0.5 / 3 = 0.1667 -> Low; 1.0 / 3 = 0.3333 -> Medium (just above 0.33)
        let low = assess(&verdicts(&[
            VerdictStatus::Unverifiable,
            VerdictStatus::Supported,
            VerdictStatus::Supported,
        ]));
        assert_eq!(low.risk_level, RiskLevel::Low);

        let medium = assess(&verdicts(&[
            VerdictStatus::Contradicted,
            VerdictStatus::Supported,
            VerdictStatus::Supported,
        ]));
        assert_eq!(medium.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0), RiskLevel::Low);
        assert_eq!(classify(0.33), RiskLevel::Low);
        assert_eq!(classify(0.3300001), RiskLevel::Medium);
        assert_eq!(classify(0.66), RiskLevel::Medium);
        assert_eq!(classify(0.6600001), RiskLevel::High);
        assert_eq!(classify(1.0), RiskLevel::High);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let statuses = [
            VerdictStatus::Supported,
            VerdictStatus::Contradicted,
            VerdictStatus::Unverifiable,
        ];
        for len in 0..8 {
            for offset in 0..statuses.len() {
                let input: Vec<_> = (0..len)
                    .map(|i| statuses[(i + offset) % statuses.len()])
                    .collect();
                let assessment = assess(&verdicts(&input));
                assert!((0.0..=1.0).contains(&assessment.risk_score));
                assert_eq!(assessment.risk_level, classify(assessment.risk_score));
            }
        }
    }

    #[test]
    fn test_assess_is_idempotent() {
        let input = verdicts(&[
            VerdictStatus::Unverifiable,
            VerdictStatus::Contradicted,
            VerdictStatus::Supported,
        ]);
        assert_eq!(assess(&input), assess(&input));
    }
}
