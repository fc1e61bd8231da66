//! Prompts for drafting and correcting answers

use crate::model::{Verdict, VerdictStatus};

/// Longest evidence excerpt quoted back to the model per verdict
const MAX_EVIDENCE_CHARS: usize = 600;

pub const DRAFT_SYSTEM_PROMPT: &str = r#"You are a knowledgeable assistant. Answer the user's question directly and factually.

- Write 2-5 plain sentences.
- State concrete facts (names, dates, places, quantities) rather than opinions.
- Do not add disclaimers or ask follow-up questions.
- Return the answer text in the `answer` field."#;

pub const CORRECTION_SYSTEM_PROMPT: &str = r#"You are a careful fact-checking editor. A previous answer to the user's question was checked claim by claim against reference material.

Rewrite the answer so that:
- Claims marked Contradicted are removed or corrected using the provided evidence.
- Claims marked Unverifiable are removed or explicitly hedged.
- Claims marked Supported may be kept.
- No new facts are introduced unless they appear in the evidence.

Return only the corrected answer text in the `answer` field."#;

pub fn build_draft_prompt(query: &str) -> String {
    format!("Question: {}", query.trim())
}

/// Build the correction prompt from the original query and every verdict
pub fn build_correction_prompt(query: &str, verdicts: &[Verdict]) -> String {
    let mut findings = String::new();

    for verdict in verdicts {
        let status = match verdict.status {
            VerdictStatus::Supported => "Supported",
            VerdictStatus::Contradicted => "Contradicted",
            VerdictStatus::Unverifiable => "Unverifiable",
        };
        findings.push_str(&format!(
            "{}. [{}, confidence {:.2}] {}\n",
            verdict.claim.index + 1,
            status,
            verdict.confidence,
            verdict.claim.text
        ));
        if !verdict.evidence.is_empty() {
            findings.push_str(&format!(
                "   Evidence: {}\n",
                truncate_chars(&verdict.evidence, MAX_EVIDENCE_CHARS)
            ));
        }
    }

    if findings.is_empty() {
        findings.push_str("(no claims were extracted)\n");
    }

    format!(
        r#"Question: {}

## Verification findings

{}
Write the corrected answer."#,
        query.trim(),
        findings
    )
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
