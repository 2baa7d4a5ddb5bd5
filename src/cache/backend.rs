//! Key/value store implementations backing the response cache.

use super::key::CacheKey;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// External key/value store with per-entry time-to-live.
///
/// A zero `ttl` is store-defined. The bundled stores treat it as "already
/// expired": the write drops any existing entry and stores nothing.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()>;
    async fn delete(&self, key: &CacheKey) -> Result<bool>;
    async fn clear(&self) -> Result<()>;
    async fn len(&self) -> Result<usize>;
    fn name(&self) -> &'static str;
}

struct CacheEntry {
    data: Vec<u8>,
    /// `None` when the TTL is past what `Instant` can represent: never expires.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |at| Instant::now() >= at)
    }
}

/// Bounded in-process store; least recently used entries are evicted first.
pub struct MemoryStore {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new(max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LruCache<String, CacheEntry>>> {
        self.entries.lock().map_err(|_| {
            Error::cache_with_context(
                "MemoryStore poisoned",
                ErrorContext::new().with_source("memory_store"),
            )
        })
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut entries = self.lock()?;
        let expired = match entries.get(&key.hash) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.data.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(&key.hash);
        }
        Ok(None)
    }
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()> {
        let mut entries = self.lock()?;
        if ttl.is_zero() {
            entries.pop(&key.hash);
            return Ok(());
        }
        let expires_at = Instant::now().checked_add(ttl);
        entries.put(key.hash.clone(), CacheEntry { data: value.to_vec(), expires_at });
        Ok(())
    }
    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.lock()?.pop(&key.hash).is_some())
    }
    async fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
    async fn len(&self) -> Result<usize> {
        Ok(self.lock()?.iter().filter(|(_, e)| !e.is_expired()).count())
    }
    fn name(&self) -> &'static str {
        "memory"
    }
}

pub struct NullStore;
impl NullStore {
    pub fn new() -> Self {
        Self
    }
}
impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for NullStore {
    async fn get(&self, _: &CacheKey) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
    async fn set(&self, _: &CacheKey, _: &[u8], _: Duration) -> Result<()> {
        Ok(())
    }
    async fn delete(&self, _: &CacheKey) -> Result<bool> {
        Ok(false)
    }
    async fn clear(&self) -> Result<()> {
        Ok(())
    }
    async fn len(&self) -> Result<usize> {
        Ok(0)
    }
    fn name(&self) -> &'static str {
        "null"
    }
}
