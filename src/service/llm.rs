//! Shared LLM client
//!
//! One OpenAI client is created at startup and cloned into every service
//! that drafts, extracts, compares or corrects text.

use rig::providers::openai;

/// Default model for all LLM-backed collaborators
pub const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key);

        Ok(Self { client })
    }

    /// Get a reference to the underlying OpenAI client
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}

/// Resolve a model name from an environment variable, falling back to [`DEFAULT_MODEL`]
pub fn model_from_env(var: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| DEFAULT_MODEL.to_string())
}
