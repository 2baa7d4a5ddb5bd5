//! 请求分发：决定 GET 请求走缓存还是网络，并对结果分类。
//!
//! Request dispatch (single pass, no retry).

use crate::cache::ResponseCache;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Request, Response};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::error_classification::classify;
use super::options::{resolve_time_to_live, ClientOptions, RequestOptions};

/// Routes a request to the cache or the transport and normalizes the outcome.
///
/// Only GET touches the cache. Every other method is sent live and its
/// response returned as-is, whatever the status.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    options: ClientOptions,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, cache: ResponseCache, options: ClientOptions) -> Self {
        Self {
            transport,
            cache,
            options,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub async fn request(&self, request: &Request, options: &RequestOptions) -> Result<Response> {
        if request.is_get() {
            self.get_request(request, options).await
        } else {
            self.send_uncached(request).await
        }
    }

    /// Cache lookup, then network, then classification, then cache write.
    pub async fn get_request(&self, request: &Request, options: &RequestOptions) -> Result<Response> {
        let request_id = Uuid::new_v4().to_string();

        if let Some(cached) = self.cache.lookup(request).await? {
            debug!(
                request_id = request_id.as_str(),
                method = %request.method(),
                url = %request.url(),
                http_status = cached.status(),
                "served from cache"
            );
            return Ok(cached);
        }

        let start = Instant::now();
        let response = self.transport.send(request).await?;
        let status = response.status();

        if let Some(kind) = classify(status).error_kind() {
            info!(
                request_id = request_id.as_str(),
                method = %request.method(),
                url = %request.url(),
                http_status = status,
                error_kind = kind.name(),
                duration_ms = start.elapsed().as_millis() as u64,
                "request failed"
            );
            return Err(ApiError::new(kind, request.clone(), response).into());
        }

        let ttl = resolve_time_to_live(options, &self.options);
        self.cache.store(request, &response, ttl).await?;

        debug!(
            request_id = request_id.as_str(),
            method = %request.method(),
            url = %request.url(),
            http_status = status,
            ttl_secs = ttl.as_secs(),
            duration_ms = start.elapsed().as_millis() as u64,
            "fetched from network"
        );
        Ok(response)
    }

    async fn send_uncached(&self, request: &Request) -> Result<Response> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let response = self.transport.send(request).await?;
        debug!(
            request_id = request_id.as_str(),
            method = %request.method(),
            url = %request.url(),
            http_status = response.status(),
            duration_ms = start.elapsed().as_millis() as u64,
            "sent uncached request"
        );
        Ok(response)
    }
}
