//! 响应缓存模块：为 GET 请求提供可插拔的键值存储缓存。
//!
//! # Response Caching Module
//!
//! Transparent caching of successful GET responses behind a pluggable
//! key/value store.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ResponseCache`] | Looks up and stores whole responses; optional store |
//! | [`CacheConfig`] | Enable switch, key prefix, entry size limit |
//! | [`KeyValueStore`] | Trait for implementing custom stores |
//! | [`MemoryStore`] | In-memory LRU store |
//! | [`FileStore`] | One-file-per-entry directory store |
//! | [`NullStore`] | No-op store |
//! | [`CacheKeyGenerator`] | Derives [`CacheKey`]s from method, path and query |
//!
//! ## Example
//!
//! ```rust
//! use rest_api_base::cache::{CacheConfig, MemoryStore, ResponseCache};
//! use std::sync::Arc;
//!
//! let cache = ResponseCache::new(CacheConfig::default(), Arc::new(MemoryStore::new(1000)));
//! assert!(cache.is_active());
//! ```
//!
//! ## Expiry
//!
//! Entries expire through the store's own TTL handling; nothing sweeps them.
//! The bundled stores treat a TTL of zero as already expired.

mod backend;
mod file;
mod key;
mod manager;

pub use backend::{KeyValueStore, MemoryStore, NullStore};
pub use file::FileStore;
pub use key::{CacheKey, CacheKeyGenerator};
pub use manager::{CacheConfig, CacheStats, ResponseCache};
