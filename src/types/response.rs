//! Response type.

use super::Headers;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Synthetic header added to responses served from the cache.
pub const CACHE_HIT_HEADER: &str = "cache-hit";
pub const CACHE_HIT_VALUE: &str = "hit";

/// A received response. Immutable; [`Response::with_added_header`] returns a copy.
///
/// Serializes with the body as base64 so arbitrary bytes survive a round trip
/// through a text-based store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    status: u16,
    #[serde(default)]
    headers: Headers,
    #[serde(with = "body_base64")]
    body: Bytes,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header_line(&self, name: &str) -> String {
        self.headers.get_line(name)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Copy of this response with one more header value.
    pub fn with_added_header(&self, name: &str, value: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.headers.append(name, value);
        copy
    }

    pub fn is_cache_hit(&self) -> bool {
        self.headers
            .get_all(CACHE_HIT_HEADER)
            .iter()
            .any(|v| v == CACHE_HIT_VALUE)
    }

    /// `true` for `[200, 400)`.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

mod body_base64 {
    use super::*;
    use base64::Engine as _;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(body: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(body))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
