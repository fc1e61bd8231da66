//! Lookup topic derivation from claim text

use crate::model::TopicStrategy;

/// Function words that are capitalised only because they open the sentence
const LEADING_STOPWORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "by", "for", "from", "during", "after", "before", "it",
    "he", "she", "they", "this", "that", "these", "those", "its", "his", "her", "their", "there",
];

/// Lowercase words allowed inside a proper-noun run ("Bank of England")
const CONNECTORS: &[&str] = &["of", "the", "de", "del", "da", "du", "von", "van", "la", "le", "and"];

/// Derive the knowledge source topic for a claim
///
/// Identical claim text always yields the identical topic.
pub fn derive_topic(claim_text: &str, strategy: TopicStrategy) -> String {
    let full = full_claim_topic(claim_text);
    match strategy {
        TopicStrategy::FullClaim => full,
        TopicStrategy::KeyPhrase => key_phrase(claim_text).unwrap_or(full),
    }
}

fn full_claim_topic(text: &str) -> String {
    text.trim()
        .trim_end_matches(['.', '!', '?', ';', ':', ','])
        .trim_end()
        .to_string()
}

/// First run of capitalised words, skipping a sentence-initial function word
fn key_phrase(text: &str) -> Option<String> {
    let mut run: Vec<&str> = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for (position, raw) in text.split_whitespace().enumerate() {
        let (word, possessive) = clean_token(raw);
        let ends_clause = possessive || raw.ends_with([',', ';', ':', '.', '!', '?']);

        if word.is_empty() {
            if !run.is_empty() {
                break;
            }
            continue;
        }

        if position == 0 && LEADING_STOPWORDS.contains(&word.to_lowercase().as_str()) {
            continue;
        }

        if is_capitalized(word) {
            run.append(&mut pending);
            run.push(word);
        } else if !run.is_empty() && !ends_clause && CONNECTORS.contains(&word) {
            pending.push(word);
            continue;
        } else if !run.is_empty() {
            break;
        }

        if ends_clause && !run.is_empty() {
            break;
        }
    }

    (!run.is_empty()).then(|| run.join(" "))
}

/// Strip surrounding punctuation and a possessive suffix; the flag reports the suffix
fn clean_token(raw: &str) -> (&str, bool) {
    let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
    match word
        .strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
    {
        Some(stem) => (stem, true),
        None => (word, false),
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
