//! Post-extraction cleanup of claim lists

use std::collections::HashSet;

use crate::model::Claim;

/// Drop blank and duplicate claim texts, then number the rest by position
///
/// Duplicates are detected case-insensitively after whitespace collapsing;
/// the first occurrence wins.
pub fn normalize_claims(raw: Vec<String>) -> Vec<Claim> {
    let mut seen = HashSet::new();

    raw.into_iter()
        .map(|text| collapse_whitespace(&text))
        .filter(|text| !text.is_empty())
        .filter(|text| seen.insert(text.to_lowercase()))
        .enumerate()
        .map(|(index, text)| Claim::new(index, text))
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
