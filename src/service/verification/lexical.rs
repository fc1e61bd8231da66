//! Lexical-overlap comparator
//!
//! A deterministic, model-free entailment heuristic: a claim is supported when
//! enough of its content words occur in the evidence, and contradicted when its
//! wording matches but the numbers it states do not.

use std::collections::HashSet;

use async_trait::async_trait;
use regex::Regex;

use super::comparator::{Comparator, ComparisonError, Judgment};
use crate::model::VerdictStatus;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "was", "were", "are", "is", "has", "had", "have", "its", "his", "her",
    "their", "with", "from", "that", "this", "which", "who", "whom", "also", "been", "being",
    "into", "onto", "about", "than", "then", "there", "these", "those", "not", "but", "all",
    "any", "one", "most", "more", "some", "such", "known", "as", "of", "in", "on", "at", "by",
    "to", "an", "a", "it", "be", "or",
];

/// Comparator based on content-word coverage
pub struct LexicalComparator {
    support_threshold: f64,
    token_pattern: Regex,
}

impl LexicalComparator {
    pub fn new(support_threshold: f64) -> Self {
        Self {
            support_threshold: support_threshold.clamp(0.0, 1.0),
            token_pattern: Regex::new(r"[\p{L}\p{N}]+").unwrap(),
        }
    }

    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.token_pattern
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
    }

    /// Distinct content words of the claim, in order of first appearance
    fn content_tokens(&self, claim: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokens(claim)
            .filter(|t| is_number(t) || (t.chars().count() >= 3 && !STOPWORDS.contains(&t.as_str())))
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    fn judge(&self, claim: &str, evidence: &str) -> Judgment {
        let claim_tokens = self.content_tokens(claim);
        if claim_tokens.is_empty() {
            return Judgment {
                status: VerdictStatus::Unverifiable,
                confidence: 0.0,
            };
        }

        let evidence_tokens: HashSet<String> = self.tokens(evidence).collect();

        let (numbers, words): (Vec<&String>, Vec<&String>) =
            claim_tokens.iter().partition(|t| is_number(t));

        let found = claim_tokens
            .iter()
            .filter(|t| evidence_tokens.contains(*t))
            .count();
        let coverage = found as f64 / claim_tokens.len() as f64;

        let word_coverage = if words.is_empty() {
            0.0
        } else {
            words.iter().filter(|t| evidence_tokens.contains(**t)).count() as f64
                / words.len() as f64
        };

        if !numbers.is_empty() && word_coverage >= self.support_threshold {
            let numbers_missing = numbers.iter().any(|n| !evidence_tokens.contains(*n));
            let evidence_has_numbers = evidence_tokens.iter().any(|t| is_number(t));
            if numbers_missing && evidence_has_numbers {
                return Judgment {
                    status: VerdictStatus::Contradicted,
                    confidence: word_coverage,
                };
            }
        }

        let status = if coverage >= self.support_threshold {
            VerdictStatus::Supported
        } else {
            VerdictStatus::Unverifiable
        };

        Judgment {
            status,
            confidence: coverage,
        }
    }
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[async_trait]
impl Comparator for LexicalComparator {
    async fn compare(&self, claim: &str, evidence: &str) -> Result<Judgment, ComparisonError> {
        Ok(self.judge(claim, evidence))
    }
}
