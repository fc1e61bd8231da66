pub mod cache;
pub mod cache_keys;
pub mod claims;
pub mod generation;
pub mod llm;
pub mod monitoring;
pub mod pipeline;
pub mod risk;
pub mod verification;

pub use cache::LookupCache;
pub use claims::LlmClaimExtractor;
pub use generation::LlmAnswerGenerator;
pub use llm::LlmClient;
pub use monitoring::{InMemoryLogSink, LogSink};
pub use pipeline::GuardPipeline;
pub use verification::{ClaimVerifier, Comparator, LexicalComparator, LlmComparator};
