//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rest_api_base::cache::{CacheKey, KeyValueStore, MemoryStore};
use rest_api_base::transport::Transport;
use rest_api_base::types::{Headers, Request, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers every request with the same status and body, counting calls.
pub struct StaticTransport {
    status: u16,
    body: String,
    calls: AtomicUsize,
    seen: Mutex<Vec<Request>>,
}

impl StaticTransport {
    pub fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Request> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn send(&self, request: &Request) -> rest_api_base::Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        let mut headers = Headers::new();
        headers.append("content-type", "application/json");
        Ok(Response::new(self.status, headers, self.body.clone()))
    }
}

/// Always fails the way a refused connection would.
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _: &Request) -> rest_api_base::Result<Response> {
        Err(rest_api_base::transport::TransportError::Other("connection refused".into()).into())
    }
}

/// Memory store that records every read and write.
pub struct RecordingStore {
    inner: MemoryStore,
    gets: AtomicUsize,
    sets: Mutex<Vec<(String, Duration)>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(64),
            gets: AtomicUsize::new(0),
            sets: Mutex::new(Vec::new()),
        })
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> Vec<(String, Duration)> {
        self.sets.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &CacheKey) -> rest_api_base::Result<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> rest_api_base::Result<()> {
        self.sets.lock().unwrap().push((key.hash.clone(), ttl));
        self.inner.set(key, value, ttl).await
    }
    async fn delete(&self, key: &CacheKey) -> rest_api_base::Result<bool> {
        self.inner.delete(key).await
    }
    async fn clear(&self) -> rest_api_base::Result<()> {
        self.inner.clear().await
    }
    async fn len(&self) -> rest_api_base::Result<usize> {
        self.inner.len().await
    }
    fn name(&self) -> &'static str {
        "recording"
    }
}
