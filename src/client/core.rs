use crate::cache::ResponseCache;
use crate::types::{Request, RequestBuilder, Response};
use crate::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::dispatcher::Dispatcher;
use super::options::{ClientOptions, RequestOptions};

/// Base client for a JSON REST API.
///
/// Holds the base URL, client-wide options and the injected capabilities.
/// Concrete APIs wrap one of these and implement [`RestApi`](super::RestApi)
/// to add typed endpoint methods.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) request_builder: Arc<dyn RequestBuilder>,
    pub(crate) dispatcher: Dispatcher,
}

/// Decoded JSON body plus the raw response it came from.
#[derive(Debug, Clone)]
pub struct JsonResponse<T = serde_json::Value> {
    /// `None` when the body is not valid JSON or is JSON `null`.
    pub data: Option<T>,
    pub response: Response,
}

impl<T> JsonResponse<T> {
    pub fn is_cache_hit(&self) -> bool {
        self.response.is_cache_hit()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiClient {
    /// Start building a client for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> super::builder::ApiClientBuilder {
        super::builder::ApiClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &ClientOptions {
        self.dispatcher.options()
    }

    pub fn cache(&self) -> &ResponseCache {
        self.dispatcher.cache()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Absolute URL for an endpoint relative to the base URL.
    pub fn full_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET request for an endpoint; may include a query string.
    pub fn create_request(&self, endpoint: &str) -> Result<Request> {
        self.build_request(Method::GET, endpoint)
    }

    pub fn build_request(&self, method: Method, endpoint: &str) -> Result<Request> {
        self.request_builder.build(method, &self.full_url(endpoint))
    }

    /// Dispatch a prebuilt request. GET responses may come from the cache.
    pub async fn request(&self, request: &Request, options: &RequestOptions) -> Result<Response> {
        self.dispatcher.request(request, options).await
    }

    /// GET `endpoint` and decode the body as JSON.
    ///
    /// Classified HTTP failures surface as [`Error::Api`](crate::Error::Api).
    /// An unparsable body is not an error; `data` is `None`.
    pub async fn get_json(&self, endpoint: &str, options: &RequestOptions) -> Result<JsonResponse> {
        let request = self.create_request(endpoint)?;
        let response = self.request(&request, options).await?;
        let data = if response.is_success() {
            serde_json::from_slice::<serde_json::Value>(response.body())
                .ok()
                .filter(|v| !v.is_null())
        } else {
            None
        };
        Ok(JsonResponse { data, response })
    }

    /// Like [`get_json`](Self::get_json) but converts the value into `T`.
    ///
    /// A body that is valid JSON of the wrong shape is an
    /// [`Error::Serialization`](crate::Error::Serialization).
    pub async fn get_json_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<JsonResponse<T>> {
        let JsonResponse { data, response } = self.get_json(endpoint, options).await?;
        let data = match data {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };
        Ok(JsonResponse { data, response })
    }
}
