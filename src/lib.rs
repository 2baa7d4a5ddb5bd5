//! # rest-api-base
//!
//! 用于构建 JSON REST API 类型化客户端的基础运行时，提供透明的 GET 响应缓存与基于 HTTP 状态码的错误分类。
//!
//! Base runtime for typed JSON REST API clients, with transparent caching of
//! GET responses and HTTP-status-based error classification.
//!
//! ## Overview
//!
//! A concrete API wraps an [`ApiClient`] and implements [`RestApi`] to add
//! typed endpoint methods. Every call goes through a single dispatch path:
//!
//! 1. GET requests are looked up in the response cache; a hit returns at once
//!    with a `cache-hit: hit` header.
//! 2. Otherwise the request is sent through the injected [`transport::Transport`].
//! 3. 4xx and 5xx responses fail with a classified [`ApiError`]; nothing is cached.
//! 4. Successful GET responses are cached with the resolved time-to-live.
//!
//! Non-GET requests skip the cache in both directions and are returned as-is.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rest_api_base::cache::MemoryStore;
//! use rest_api_base::{ApiClient, RequestOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> rest_api_base::Result<()> {
//!     let client = ApiClient::builder("https://api.thecatapi.com/v1/")
//!         .store(Arc::new(MemoryStore::new(1000)))
//!         .build()?;
//!
//!     let cats = client.get_json("images/search?limit=10", &RequestOptions::new()).await?;
//!     println!("cache hit: {}", cats.is_cache_hit());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Base client, builder, dispatcher, options, status classification |
//! | [`cache`] | Response cache, cache keys and key/value stores |
//! | [`transport`] | Transport capability and the default HTTP transport |
//! | [`types`] | Request, response, headers and the request builder capability |
//! | [`error`] | Error taxonomy |

pub mod cache;
pub mod client;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{
    ApiClient, ApiClientBuilder, ClientOptions, JsonResponse, RequestOptions, RestApi,
};
pub use types::{Request, Response};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, ApiErrorKind, Error, ErrorContext};
