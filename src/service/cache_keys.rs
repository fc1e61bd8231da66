//! Cache key generation for knowledge source lookups

use sha2::{Digest, Sha256};

/// Generate the cache key hash for a lookup
///
/// Topics differing only in surrounding whitespace share a key. Letter case is
/// kept since reference titles are case-sensitive ("MIT" is not "Mit"). Keys are
/// namespaced by source so two sources never collide.
pub fn generate_lookup_cache_key(source: &str, topic: &str) -> String {
    hash_string(&format!("{}|{}", source, topic.trim()))
}

/// Hash a string to a hex string using SHA256
fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}
