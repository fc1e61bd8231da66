use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "GUARD_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_WIKIPEDIA_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_USER_AGENT: &str = "AI-Hallucination-Guard/1.0";

/// Knowledge source (reference lookup) configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeSourceConfig {
    /// Query endpoint of the MediaWiki-compatible reference service
    pub endpoint: String,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
    /// Per-lookup timeout; an expired lookup is reported as a failure
    pub timeout_secs: u64,
    /// Cache lookups in Redis
    pub cache: bool,
}

impl Default for KnowledgeSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WIKIPEDIA_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            cache: false,
        }
    }
}

impl KnowledgeSourceConfig {
    /// Lookup timeout, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// How a lookup topic is derived from claim text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStrategy {
    FullClaim,
    #[default]
    KeyPhrase,
}

/// Which entailment comparator judges claims against evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    #[default]
    Llm,
    Lexical,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Maximum claims verified concurrently within one request
    pub max_concurrency: usize,
    /// Upper bound for verifying a single claim, lookup and comparison included
    pub claim_timeout_secs: u64,
    pub topic_strategy: TopicStrategy,
    pub comparator: ComparatorKind,
    /// Minimum content-word coverage for the lexical comparator to report support
    pub support_threshold: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            claim_timeout_secs: 20,
            topic_strategy: TopicStrategy::default(),
            comparator: ComparatorKind::default(),
            support_threshold: 0.6,
        }
    }
}

impl VerificationConfig {
    /// Per-claim timeout, never shorter than one second
    pub fn claim_timeout(&self) -> Duration {
        Duration::from_secs(self.claim_timeout_secs.max(1))
    }
}

/// Where response records are logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStoreKind {
    #[default]
    Memory,
    Postgres,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub knowledge_source: KnowledgeSourceConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
    #[serde(default)]
    pub log_store: LogStoreKind,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub knowledge_source: KnowledgeSourceConfig,
    pub verification: VerificationConfig,
    pub log_store: LogStoreKind,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_source: KnowledgeSourceConfig::default(),
            verification: VerificationConfig::default(),
            log_store: LogStoreKind::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            knowledge_source: file.knowledge_source,
            verification: file.verification,
            log_store: file.log_store,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse_config(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    /// Parse YAML config contents; an empty document yields defaults
    pub fn parse_config(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
