//! Response cache: keys requests, serializes responses, tracks statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use super::backend::KeyValueStore;
use super::key::{CacheKey, CacheKeyGenerator};
use crate::types::{Request, Response, CACHE_HIT_HEADER, CACHE_HIT_VALUE};
use crate::Result;

#[derive(Debug, Clone)]
pub struct CacheConfig { pub enabled: bool, pub max_entry_size: usize, pub key_prefix: Option<String> }

impl Default for CacheConfig {
    fn default() -> Self { Self { enabled: true, max_entry_size: 10 * 1024 * 1024, key_prefix: None } }
}

impl CacheConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_enabled(mut self, enabled: bool) -> Self { self.enabled = enabled; self }
    pub fn with_max_entry_size(mut self, bytes: usize) -> Self { self.max_entry_size = bytes; self }
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self { self.key_prefix = Some(prefix.into()); self }
}

#[derive(Debug, Clone, Default)]
pub struct CacheStats { pub hits: u64, pub misses: u64, pub sets: u64, pub deletes: u64, pub errors: u64 }

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 { let total = self.hits + self.misses; if total == 0 { 0.0 } else { self.hits as f64 / total as f64 } }
}

struct AtomicStats { hits: AtomicU64, misses: AtomicU64, sets: AtomicU64, deletes: AtomicU64, errors: AtomicU64 }
impl AtomicStats {
    fn new() -> Self { Self { hits: AtomicU64::new(0), misses: AtomicU64::new(0), sets: AtomicU64::new(0), deletes: AtomicU64::new(0), errors: AtomicU64::new(0) } }
    fn to_stats(&self) -> CacheStats { CacheStats { hits: self.hits.load(Ordering::Relaxed), misses: self.misses.load(Ordering::Relaxed), sets: self.sets.load(Ordering::Relaxed), deletes: self.deletes.load(Ordering::Relaxed), errors: self.errors.load(Ordering::Relaxed) } }
}

/// Cache of whole responses keyed by request.
///
/// The store is optional: without one every lookup misses and every store is
/// a no-op. Status codes are never inspected here; the dispatcher decides
/// what is cacheable.
#[derive(Clone)]
pub struct ResponseCache { config: CacheConfig, keys: CacheKeyGenerator, store: Option<Arc<dyn KeyValueStore>>, stats: Arc<AtomicStats> }

impl ResponseCache {
    pub fn new(config: CacheConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self { config, keys: CacheKeyGenerator::new(), store: Some(store), stats: Arc::new(AtomicStats::new()) }
    }

    /// A cache with no store behind it.
    pub fn disabled() -> Self {
        Self { config: CacheConfig::default(), keys: CacheKeyGenerator::new(), store: None, stats: Arc::new(AtomicStats::new()) }
    }

    pub fn with_key_generator(mut self, keys: CacheKeyGenerator) -> Self { self.keys = keys; self }

    pub fn is_active(&self) -> bool { self.config.enabled && self.store.is_some() }

    pub fn key_for(&self, request: &Request) -> CacheKey {
        let key = self.keys.generate(request);
        match self.config.key_prefix {
            Some(ref p) => CacheKey { hash: format!("{}:{}", p, key.hash), ..key },
            None => key,
        }
    }

    /// Stored response for `request` marked with `cache-hit: hit`, or `None`.
    pub async fn lookup(&self, request: &Request) -> Result<Option<Response>> {
        let Some(store) = self.active_store() else { return Ok(None) };
        let key = self.key_for(request);
        match store.get(&key).await {
            Ok(Some(data)) => match serde_json::from_slice::<Response>(&data) {
                Ok(stored) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, endpoint = key.endpoint.as_deref().unwrap_or_default(), "cache hit");
                    Ok(Some(stored.with_added_header(CACHE_HIT_HEADER, CACHE_HIT_VALUE)))
                }
                Err(e) => {
                    self.stats.errors.fetch_add(1, Ordering::Relaxed);
                    warn!(key = %key, error = %e, "undecodable cache entry treated as miss");
                    Ok(None)
                }
            },
            Ok(None) => { self.stats.misses.fetch_add(1, Ordering::Relaxed); Ok(None) }
            Err(e) => { self.stats.errors.fetch_add(1, Ordering::Relaxed); Err(e) }
        }
    }

    /// Write `response` under the key for `request`, replacing any previous entry.
    pub async fn store(&self, request: &Request, response: &Response, ttl: Duration) -> Result<()> {
        let Some(store) = self.active_store() else { return Ok(()) };
        let data = serde_json::to_vec(response)?;
        let key = self.key_for(request);
        if data.len() > self.config.max_entry_size {
            debug!(key = %key, size = data.len(), limit = self.config.max_entry_size, "response too large to cache");
            return Ok(());
        }
        match store.set(&key, &data, ttl).await {
            Ok(()) => {
                self.stats.sets.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, ttl_secs = ttl.as_secs(), "cached response");
                Ok(())
            }
            Err(e) => { self.stats.errors.fetch_add(1, Ordering::Relaxed); Err(e) }
        }
    }

    /// Drop the entry for `request`, if any.
    pub async fn invalidate(&self, request: &Request) -> Result<bool> {
        let Some(store) = self.active_store() else { return Ok(false) };
        match store.delete(&self.key_for(request)).await { Ok(d) => { if d { self.stats.deletes.fetch_add(1, Ordering::Relaxed); } Ok(d) } Err(e) => { self.stats.errors.fetch_add(1, Ordering::Relaxed); Err(e) } }
    }

    pub fn stats(&self) -> CacheStats { self.stats.to_stats() }
    pub fn store_name(&self) -> Option<&'static str> { self.store.as_ref().map(|s| s.name()) }

    fn active_store(&self) -> Option<&Arc<dyn KeyValueStore>> {
        if self.config.enabled { self.store.as_ref() } else { None }
    }
}

impl Default for ResponseCache {
    fn default() -> Self { Self::disabled() }
}
