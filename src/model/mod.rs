pub mod claims;
pub mod config;
pub mod record;
pub mod risk;
pub mod stats;
pub mod verdict;

pub use claims::Claim;
pub use config::{
    ComparatorKind, Config, KnowledgeSourceConfig, LogStoreKind, TopicStrategy,
    VerificationConfig,
};
pub use record::ResponseRecord;
pub use risk::{RiskAssessment, RiskLevel};
pub use stats::{GuardStats, RiskLevelCounts, StatsAccumulator, VerdictCounts};
pub use verdict::{Verdict, VerdictStatus};
