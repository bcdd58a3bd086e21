//! In-memory TTL cache for aggregated search responses.
//!
//! Caches the final sorted response keyed by the (lowercased query,
//! selector, sorted source set) triple. Uses [`moka`] for async-friendly
//! caching with automatic eviction. Nothing is persisted.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::future::Cache;

use crate::types::{SearchResponse, Source, SourceSelector};

/// Maximum number of cached responses.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Composite cache key: normalised query + selector + source set hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    selector: SourceSelector,
    /// Hash of the sorted configured sources, so `all` searches over
    /// different source sets produce different entries.
    source_hash: u64,
}

impl CacheKey {
    /// Build a deterministic cache key.
    pub fn new(query: &str, selector: SourceSelector, sources: &[Source]) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            selector,
            source_hash: hash_sources(sources),
        }
    }
}

/// Response cache owned by one [`crate::TorrentSearch`] instance.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<CacheKey, SearchResponse>,
}

impl ResponseCache {
    /// A cache with the given TTL, or `None` when `ttl_seconds` is 0.
    pub fn new(ttl_seconds: u64) -> Option<Self> {
        if ttl_seconds == 0 {
            return None;
        }
        let inner = Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();
        Some(Self { inner })
    }

    /// Look up a cached response. `None` on miss or expiry.
    pub async fn get(&self, key: &CacheKey) -> Option<SearchResponse> {
        self.inner.get(key).await
    }

    /// Store a response.
    pub async fn insert(&self, key: CacheKey, response: SearchResponse) {
        self.inner.insert(key, response).await;
    }
}

/// Order-independent hash of a source list.
fn hash_sources(sources: &[Source]) -> u64 {
    let mut sorted: Vec<&Source> = sources.iter().collect();
    sorted.sort_by_key(|s| s.name());
    sorted.dedup();
    let mut hasher = DefaultHasher::new();
    for source in sorted {
        source.name().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TorrentRecord;

    fn response(name: &str) -> SearchResponse {
        SearchResponse {
            query: "q".into(),
            total: 1,
            results: vec![TorrentRecord::named(name, Source::Yts)],
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn cache_key_normalises_query() {
        let a = CacheKey::new("  Big Buck ", SourceSelector::All, Source::all());
        let b = CacheKey::new("big buck", SourceSelector::All, Source::all());
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_differs_by_selector() {
        let a = CacheKey::new("q", SourceSelector::All, Source::all());
        let b = CacheKey::new("q", SourceSelector::One(Source::Yts), Source::all());
        assert_ne!(a, b);
    }

    #[test]
    fn source_hash_order_independent() {
        let a = hash_sources(&[Source::Yts, Source::Rarbg]);
        let b = hash_sources(&[Source::Rarbg, Source::Yts]);
        assert_eq!(a, b);
        assert_ne!(a, hash_sources(&[Source::Yts]));
    }

    #[test]
    fn zero_ttl_disables_cache() {
        assert!(ResponseCache::new(0).is_none());
        assert!(ResponseCache::new(60).is_some());
    }

    #[tokio::test]
    async fn insert_and_retrieve() {
        let cache = ResponseCache::new(600).expect("cache");
        let key = CacheKey::new("sintel", SourceSelector::All, Source::all());
        assert!(cache.get(&key).await.is_none());

        cache.insert(key.clone(), response("Sintel")).await;
        let cached = cache.get(&key).await.expect("should be cached");
        assert_eq!(cached.results[0].name, "Sintel");
    }

    #[tokio::test]
    async fn overwrite_same_key_updates_value() {
        let cache = ResponseCache::new(600).expect("cache");
        let key = CacheKey::new("q", SourceSelector::All, Source::all());
        cache.insert(key.clone(), response("Old")).await;
        cache.insert(key.clone(), response("New")).await;
        let cached = cache.get(&key).await.expect("should be cached");
        assert_eq!(cached.results[0].name, "New");
    }
}
