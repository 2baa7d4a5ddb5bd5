//! Client-level and per-call options.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One week, the lifetime applied to GET responses when nothing else is configured.
pub const DEFAULT_TIME_TO_LIVE: u64 = 7 * 24 * 60 * 60;

/// Defaults shared by every call a client makes.
///
/// Deserializes from `snake_case` or the `timeToLive` spelling:
///
/// ```rust
/// use rest_api_base::client::ClientOptions;
///
/// let opts = ClientOptions::from_yaml_str("timeToLive: 3600").unwrap();
/// assert_eq!(opts.time_to_live, Some(3600));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Seconds a cached GET response stays valid.
    #[serde(default, alias = "timeToLive")]
    pub time_to_live: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            time_to_live: Some(DEFAULT_TIME_TO_LIVE),
        }
    }
}

impl ClientOptions {
    /// Options with nothing set; every TTL resolves from the call or to zero.
    pub fn empty() -> Self {
        Self { time_to_live: None }
    }

    pub fn with_time_to_live(mut self, secs: u64) -> Self {
        self.time_to_live = Some(secs);
        self
    }

    /// Defaults with `REST_API_CACHE_TTL_SECS` applied when set and numeric.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(ttl) = std::env::var("REST_API_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            opts.time_to_live = Some(ttl);
        }
        opts
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "invalid client options",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("client_options"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                "cannot read client options",
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_details(e.to_string())
                    .with_source("client_options"),
            )
        })?;
        Self::from_yaml_str(&raw)
    }
}

/// Options for a single call; anything unset falls back to [`ClientOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default, alias = "timeToLive")]
    pub time_to_live: Option<u64>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_to_live(secs: u64) -> Self {
        Self {
            time_to_live: Some(secs),
        }
    }
}

/// Cache lifetime for one call: call option, then client option, then zero.
///
/// A zero at either tier counts as unset and falls through.
pub fn resolve_time_to_live(call: &RequestOptions, client: &ClientOptions) -> Duration {
    let secs = call
        .time_to_live
        .filter(|s| *s > 0)
        .or(client.time_to_live.filter(|s| *s > 0))
        .unwrap_or(0);
    Duration::from_secs(secs)
}
