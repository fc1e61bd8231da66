//! Transparent caching wrapper around a knowledge source

use std::sync::Arc;

use async_trait::async_trait;

use super::{KnowledgeSource, LookupOutcome};
use crate::service::cache::LookupCache;
use crate::service::cache_keys::generate_lookup_cache_key;

/// Serves repeated lookups from Redis
///
/// Only `Content` and `Absent` are cached; failures always reach the source
/// again on the next lookup. Cache errors are logged and bypassed.
pub struct CachedKnowledgeSource {
    inner: Arc<dyn KnowledgeSource>,
    cache: LookupCache,
}

impl CachedKnowledgeSource {
    pub fn new(inner: Arc<dyn KnowledgeSource>, cache: LookupCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl KnowledgeSource for CachedKnowledgeSource {
    async fn lookup(&self, topic: &str) -> LookupOutcome {
        let key = generate_lookup_cache_key(self.inner.name(), topic);

        if let Ok(cached) = self.cache.get_lookup::<LookupOutcome>(&key).await {
            tracing::debug!(topic = %topic, outcome = cached.kind(), "Cache hit for lookup");
            return cached;
        }

        let outcome = self.inner.lookup(topic).await;

        if !matches!(outcome, LookupOutcome::Failure(_))
            && let Err(e) = self.cache.set_lookup(&key, &outcome).await
        {
            tracing::debug!(topic = %topic, error = %e, "Failed to cache lookup");
        }

        outcome
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
