//! Request type and the request builder capability.

use super::Headers;
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::Method;
use url::Url;

/// An outgoing request. Immutable once built; the `with_*` methods consume
/// the value and return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Headers,
    body: Option<Bytes>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body and set `content-type`.
    pub fn with_json<T: serde::Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        let mut req = self.with_body(body);
        req.headers.insert("content-type", "application/json");
        Ok(req)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// URL path followed by `?query` when a query string is present.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(q) => format!("{}?{}", self.url.path(), q),
            None => self.url.path().to_string(),
        }
    }
}

/// Builds requests from a method and an absolute URL.
pub trait RequestBuilder: Send + Sync {
    fn build(&self, method: Method, url: &str) -> Result<Request>;
}

/// Parses the URL and attaches a fixed set of default headers
/// (`accept: application/json` unless overridden).
#[derive(Debug, Clone)]
pub struct DefaultRequestBuilder {
    default_headers: Headers,
}

impl DefaultRequestBuilder {
    pub fn new() -> Self {
        let mut default_headers = Headers::new();
        default_headers.insert("accept", "application/json");
        Self { default_headers }
    }

    pub fn with_default_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name, value);
        self
    }
}

impl Default for DefaultRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder for DefaultRequestBuilder {
    fn build(&self, method: Method, url: &str) -> Result<Request> {
        let parsed = Url::parse(url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid request url '{}'", url),
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("request_builder"),
            )
        })?;
        let mut request = Request::new(method, parsed);
        for (name, value) in self.default_headers.iter() {
            request = request.with_header(name, value);
        }
        Ok(request)
    }
}
