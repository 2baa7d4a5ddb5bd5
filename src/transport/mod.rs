//! 传输层：发送请求的可替换能力。
//!
//! The dispatcher never talks to the network directly; it calls a
//! [`Transport`]. [`HttpTransport`] is the default, built on `reqwest`.
//! Transport failures are returned as [`TransportError`] and are never
//! reclassified by the dispatcher.

mod http;

pub use http::{HttpTransport, HttpTransportConfig};

use crate::types::{Request, Response};
use crate::Result;
use async_trait::async_trait;

/// Sends one request and returns whatever response came back, whatever its status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Response>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
