//! Extension point for concrete APIs.

use crate::types::{Request, Response};
use crate::Result;
use serde::de::DeserializeOwned;
use std::future::Future;

use super::core::{ApiClient, JsonResponse};
use super::options::RequestOptions;

/// Implemented by concrete API types to inherit the dispatch primitives.
///
/// ```rust,no_run
/// use rest_api_base::client::{ApiClient, RequestOptions, RestApi};
///
/// struct Swapi {
///     client: ApiClient,
/// }
///
/// impl RestApi for Swapi {
///     fn client(&self) -> &ApiClient {
///         &self.client
///     }
/// }
///
/// impl Swapi {
///     async fn person(&self, id: u32) -> rest_api_base::Result<Option<serde_json::Value>> {
///         let json = self.get_json(&format!("people/{}/", id), &RequestOptions::new()).await?;
///         Ok(json.data)
///     }
/// }
/// ```
pub trait RestApi: Sync {
    fn client(&self) -> &ApiClient;

    /// The returned future is `Send` and safe to use across threads.
    fn get_json(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<JsonResponse>> + Send {
        self.client().get_json(endpoint, options)
    }

    fn get_json_as<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<JsonResponse<T>>> + Send {
        self.client().get_json_as(endpoint, options)
    }

    fn request(
        &self,
        request: &Request,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.client().request(request, options)
    }
}
