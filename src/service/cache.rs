//! Redis cache for knowledge source lookups

use std::env;

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

// Environment variable names
const ENV_REDIS_HOST: &str = "GUARD_REDIS_HOST";
const ENV_REDIS_PORT: &str = "GUARD_REDIS_PORT";
const ENV_REDIS_PASSWORD: &str = "GUARD_REDIS_PASSWORD";
const ENV_REDIS_DB: &str = "GUARD_REDIS_DB";
const ENV_CACHE_TTL: &str = "GUARD_CACHE_TTL";

// Default values
const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: &str = "6379";
const DEFAULT_REDIS_DB: &str = "0";
const DEFAULT_TTL_SECONDS: u64 = 24 * 60 * 60; // 1 day

const PREFIX_LOOKUP: &str = "lookup:";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cache miss for key: {0}")]
    Miss(String),
}

/// Redis-based cache for reference lookups
#[derive(Clone)]
pub struct LookupCache {
    client: Client,
    ttl_seconds: u64,
}

impl LookupCache {
    /// Create a new cache instance and verify connection
    ///
    /// Configuration via environment variables:
    /// - `GUARD_REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `GUARD_REDIS_PORT` - Redis port (default: 6379)
    /// - `GUARD_REDIS_PASSWORD` - Redis password (default: none)
    /// - `GUARD_REDIS_DB` - Redis database number (default: 0)
    /// - `GUARD_CACHE_TTL` - Cache TTL in seconds (default: 86400)
    pub async fn new() -> Result<Self, CacheError> {
        let host = env::var(ENV_REDIS_HOST).unwrap_or_else(|_| DEFAULT_REDIS_HOST.to_string());
        let port = env::var(ENV_REDIS_PORT).unwrap_or_else(|_| DEFAULT_REDIS_PORT.to_string());
        let password = env::var(ENV_REDIS_PASSWORD).ok();
        let db = env::var(ENV_REDIS_DB).unwrap_or_else(|_| DEFAULT_REDIS_DB.to_string());

        let ttl_seconds = env::var(ENV_CACHE_TTL)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);

        // redis://[password@]host:port/db
        let redis_url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        tracing::debug!(host = %host, port = %port, db = %db, "Connecting to Redis");

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        tracing::info!(host = %host, port = %port, "Redis connection established");

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    /// Get a cached lookup result by key hash
    pub async fn get_lookup<T: DeserializeOwned>(&self, key_hash: &str) -> Result<T, CacheError> {
        let full_key = format!("{}{}", PREFIX_LOOKUP, key_hash);
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let data: Option<String> = conn.get(&full_key).await?;

        match data {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| CacheError::Serialization(e.to_string()))
            }
            None => Err(CacheError::Miss(full_key)),
        }
    }

    /// Cache a lookup result by key hash
    pub async fn set_lookup<T: Serialize>(&self, key_hash: &str, data: &T) -> Result<(), CacheError> {
        let full_key = format!("{}{}", PREFIX_LOOKUP, key_hash);
        let json =
            serde_json::to_string(data).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(&full_key, json, self.ttl_seconds).await?;

        tracing::debug!(key = %full_key, ttl = self.ttl_seconds, "Cached lookup");
        Ok(())
    }
}
