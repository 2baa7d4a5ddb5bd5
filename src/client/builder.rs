use crate::cache::{CacheConfig, CacheKeyGenerator, KeyValueStore, ResponseCache};
use crate::client::core::ApiClient;
use crate::client::dispatcher::Dispatcher;
use crate::client::options::ClientOptions;
use crate::transport::{HttpTransport, Transport};
use crate::types::{DefaultRequestBuilder, RequestBuilder};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::debug;

/// Builder for creating clients with custom configuration.
///
/// Every capability has a default: [`HttpTransport`], [`DefaultRequestBuilder`],
/// options from [`ClientOptions::from_env`], and no cache store.
pub struct ApiClientBuilder {
    base_url: String,
    options: Option<ClientOptions>,
    transport: Option<Arc<dyn Transport>>,
    request_builder: Option<Arc<dyn RequestBuilder>>,
    store: Option<Arc<dyn KeyValueStore>>,
    cache_config: CacheConfig,
    key_generator: CacheKeyGenerator,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            options: None,
            transport: None,
            request_builder: None,
            store: None,
            cache_config: CacheConfig::default(),
            key_generator: CacheKeyGenerator::new(),
        }
    }

    /// Replace the client-wide options.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Client-wide cache lifetime in seconds.
    pub fn time_to_live(mut self, secs: u64) -> Self {
        let options = self.options.take().unwrap_or_else(ClientOptions::from_env);
        self.options = Some(options.with_time_to_live(secs));
        self
    }

    /// Inject a transport. Default is [`HttpTransport::new`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Inject a request builder. Default is [`DefaultRequestBuilder`].
    pub fn request_builder(mut self, builder: Arc<dyn RequestBuilder>) -> Self {
        self.request_builder = Some(builder);
        self
    }

    /// Enable response caching backed by `store`.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    pub fn key_generator(mut self, generator: CacheKeyGenerator) -> Self {
        self.key_generator = generator;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base url '{}'", self.base_url),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(e.to_string())
                    .with_source("api_client_builder"),
            )
        })?;

        let options = self.options.unwrap_or_else(ClientOptions::from_env);
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new()?),
        };
        let request_builder: Arc<dyn RequestBuilder> = match self.request_builder {
            Some(b) => b,
            None => Arc::new(DefaultRequestBuilder::new()),
        };
        let cache = match self.store {
            Some(store) => ResponseCache::new(self.cache_config, store)
                .with_key_generator(self.key_generator),
            None => ResponseCache::disabled(),
        };

        debug!(
            base_url = self.base_url.as_str(),
            store = cache.store_name().unwrap_or("none"),
            time_to_live = ?options.time_to_live,
            "built api client"
        );

        Ok(ApiClient {
            base_url: self.base_url,
            request_builder,
            dispatcher: Dispatcher::new(transport, cache, options),
        })
    }
}
