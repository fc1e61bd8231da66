//! Prompts for LLM entailment judgment

/// Longest evidence text sent to the comparator
pub const MAX_EVIDENCE_CHARS: usize = 6000;

pub const COMPARISON_SYSTEM_PROMPT: &str = r#"You are a strict fact checker. Decide whether a claim is entailed by a reference text.

## Status

- "Supported": the reference text states or directly implies the claim.
- "Contradicted": the reference text states something incompatible with the claim (different date, number, place, person, or a negation).
- "Unverifiable": the reference text neither supports nor contradicts the claim.

## Rules

- Judge only against the reference text. Ignore your own background knowledge.
- A claim that is partly supported and partly contradicted is "Contradicted".
- `confidence` is a number between 0.0 and 1.0 expressing how sure you are of the status."#;

pub fn build_comparison_prompt(claim: &str, evidence: &str) -> String {
    let evidence = match evidence.char_indices().nth(MAX_EVIDENCE_CHARS) {
        Some((idx, _)) => &evidence[..idx],
        None => evidence,
    };

    format!(
        r#"## Claim

{}

## Reference text

{}

---

Return structured JSON with `status` (Supported | Contradicted | Unverifiable) and `confidence` (0.0-1.0)."#,
        claim.trim(),
        evidence.trim()
    )
}
