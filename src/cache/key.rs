//! Cache key generation.

use crate::types::Request;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Stable identifier for a cacheable request.
///
/// Only `hash` addresses the store; `method` and `endpoint` are carried for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheKey {
    pub hash: String,
    pub method: Option<String>,
    pub endpoint: Option<String>,
}

impl CacheKey {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into(), method: None, endpoint: None }
    }
    pub fn with_method(mut self, method: impl Into<String>) -> Self { self.method = Some(method.into()); self }
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self { self.endpoint = Some(endpoint.into()); self }
    pub fn as_str(&self) -> &str { &self.hash }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool { self.hash == other.hash }
}
impl Eq for CacheKey {}

impl std::hash::Hash for CacheKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.hash.hash(state) }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.hash) }
}

impl From<&str> for CacheKey { fn from(s: &str) -> Self { Self::new(s) } }
impl From<String> for CacheKey { fn from(s: String) -> Self { Self::new(s) } }

/// Derives keys from `METHOD:path?query`, hashed with SHA-256 and truncated to 128 bits.
#[derive(Debug, Clone)]
pub struct CacheKeyGenerator {
    include_method: bool,
    salt: Option<String>,
}

impl CacheKeyGenerator {
    pub fn new() -> Self { Self { include_method: true, salt: None } }
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self { self.salt = Some(salt.into()); self }
    /// Whether the method takes part in the hash. Only GET is cached today, so this
    /// matters only to callers sharing a store across methods.
    pub fn include_method(mut self, include: bool) -> Self { self.include_method = include; self }

    pub fn generate(&self, request: &Request) -> CacheKey {
        let method = request.method().as_str();
        let endpoint = request.path_and_query();
        let mut canonical = String::with_capacity(method.len() + endpoint.len() + 1);
        if self.include_method {
            canonical.push_str(method);
            canonical.push(':');
        }
        canonical.push_str(&endpoint);
        let mut hasher = Sha256::new();
        if let Some(ref s) = self.salt {
            hasher.update(s.as_bytes());
            hasher.update(b"\0");
        }
        hasher.update(canonical.as_bytes());
        let hash: String = hasher.finalize()[..16].iter().map(|b| format!("{:02x}", b)).collect();
        CacheKey::new(hash).with_method(method).with_endpoint(endpoint)
    }
}

impl Default for CacheKeyGenerator { fn default() -> Self { Self::new() } }
