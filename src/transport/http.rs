use super::{Transport, TransportError};
use crate::types::{Headers, Request, Response};
use crate::Result;
use async_trait::async_trait;
use reqwest::Proxy;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

impl HttpTransportConfig {
    /// Defaults overridden by `REST_API_HTTP_TIMEOUT_SECS`,
    /// `REST_API_HTTP_POOL_MAX_IDLE_PER_HOST`, `REST_API_HTTP_POOL_IDLE_TIMEOUT_SECS`
    /// and `REST_API_PROXY_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: env::var("REST_API_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pool_max_idle_per_host: env::var("REST_API_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            pool_idle_timeout: env::var("REST_API_HTTP_POOL_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.pool_idle_timeout),
            proxy_url: env::var("REST_API_PROXY_URL").ok(),
        }
    }
}

/// Default transport over a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpTransportConfig::from_env())
    }

    pub fn with_config(config: &HttpTransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(TransportError::Http)?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Response> {
        let mut req = self
            .client
            .request(request.method().clone(), request.url().clone());

        for (name, value) in request.headers().iter() {
            req = req.header(name, value);
        }
        if let Some(body) = request.body() {
            req = req.body(body.clone());
        }

        let resp = req.send().await.map_err(TransportError::Http)?;
        let status = resp.status().as_u16();
        let headers = Headers::from(resp.headers());
        let body = resp.bytes().await.map_err(TransportError::Http)?;

        debug!(
            method = %request.method(),
            url = %request.url(),
            http_status = status,
            bytes = body.len(),
            "http transport round trip"
        );

        Ok(Response::new(status, headers, body))
    }
}
