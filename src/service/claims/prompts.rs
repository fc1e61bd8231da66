//! Prompts for claim extraction

pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a fact-checking analyst. Your task is to break an answer into discrete, independently checkable factual claims.

## Rules

1. Each claim states exactly one fact.
2. Each claim is self-contained: replace pronouns with the entity they refer to.
   - "He was born in Ulm." → "Albert Einstein was born in Ulm."
3. Keep names, dates and quantities exactly as written in the answer.
4. Skip opinions, advice, greetings and hedged speculation.
5. Do not add facts that are not in the answer.

Return an empty `claims` array if the answer contains no factual claims."#;

pub fn build_extraction_prompt(draft: &str) -> String {
    format!(
        r#"Extract the factual claims from the following answer.

## Answer

{}

---

Return structured JSON with a `claims` array of strings, in the order the facts appear."#,
        draft.trim()
    )
}
