//! 类型系统模块：定义请求、响应与头部等核心数据类型。
//!
//! # Types Module
//!
//! This module defines the HTTP primitives the dispatcher works with. They are
//! deliberately independent of any concrete transport so that transports and
//! cache stores can be swapped without touching the dispatch logic.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Request`] | Immutable request: method, absolute URL, headers, optional body |
//! | [`Response`] | Immutable response: status, headers, body bytes (serializable) |
//! | [`Headers`] | Case-insensitive, multi-valued header map |
//! | [`RequestBuilder`] | Capability that builds a [`Request`] from method + URL |
//! | [`DefaultRequestBuilder`] | Default builder adding JSON `accept` headers |
//!
//! ## Example
//!
//! ```rust
//! use rest_api_base::types::{DefaultRequestBuilder, Headers, RequestBuilder, Response};
//! use reqwest::Method;
//!
//! let builder = DefaultRequestBuilder::new();
//! let request = builder.build(Method::GET, "https://swapi.dev/api/people/1/").unwrap();
//! assert_eq!(request.path_and_query(), "/api/people/1/");
//!
//! let response = Response::new(200, Headers::new(), r#"{"name":"Luke"}"#);
//! assert!(!response.is_cache_hit());
//! ```

pub mod headers;
pub mod request;
pub mod response;

pub use headers::Headers;
pub use request::{DefaultRequestBuilder, Request, RequestBuilder};
pub use response::{Response, CACHE_HIT_HEADER, CACHE_HIT_VALUE};
