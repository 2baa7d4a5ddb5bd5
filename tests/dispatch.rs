//! Dispatch behavior: cache short-circuit, classification, TTL resolution.

mod common;

use common::{FailingTransport, RecordingStore, StaticTransport};
use rest_api_base::cache::{CacheConfig, CacheKeyGenerator, KeyValueStore, MemoryStore};
use rest_api_base::client::DEFAULT_TIME_TO_LIVE;
use rest_api_base::types::{DefaultRequestBuilder, RequestBuilder};
use rest_api_base::{ApiClient, ApiErrorKind, ClientOptions, Error, RequestOptions, RestApi};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

const BASE: &str = "https://api.example.com/v1/";

fn client_with(
    transport: Arc<StaticTransport>,
    store: Option<Arc<RecordingStore>>,
    options: ClientOptions,
) -> ApiClient {
    let mut builder = ApiClient::builder(BASE).transport(transport).options(options);
    if let Some(store) = store {
        builder = builder.store(store);
    }
    builder.build().unwrap()
}

#[tokio::test]
async fn test_second_get_is_served_from_cache() {
    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let store = RecordingStore::new();
    let client = client_with(transport.clone(), Some(store.clone()), ClientOptions::default());

    let first = client.get_json("things?page=1", &RequestOptions::new()).await.unwrap();
    assert!(!first.is_cache_hit());
    assert_eq!(first.response.header_line("cache-hit"), "");

    let second = client.get_json("things?page=1", &RequestOptions::new()).await.unwrap();
    assert!(second.is_cache_hit());
    assert_eq!(second.response.header_line("cache-hit"), "hit");
    assert_eq!(second.data, first.data);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_fresh_fetch_is_stored_with_resolved_ttl() {
    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let store = RecordingStore::new();
    let client = client_with(transport.clone(), Some(store.clone()), ClientOptions::default());

    let response = client
        .get_json("things", &RequestOptions::time_to_live(60))
        .await
        .unwrap()
        .response;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), r#"{"a":1}"#);

    let sets = store.sets();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].1, Duration::from_secs(60));

    // different query, client default applies
    client.get_json("things?x=2", &RequestOptions::new()).await.unwrap();
    assert_eq!(store.sets()[1].1, Duration::from_secs(DEFAULT_TIME_TO_LIVE));
}

#[tokio::test]
async fn test_redirect_status_is_success_and_cached() {
    let transport = StaticTransport::new(304, "");
    let store = RecordingStore::new();
    let client = client_with(transport, Some(store.clone()), ClientOptions::default());

    let json = client.get_json("etagged", &RequestOptions::new()).await.unwrap();
    assert!(json.data.is_none());
    assert_eq!(json.response.status(), 304);
    assert_eq!(store.sets().len(), 1);
}

#[tokio::test]
async fn test_no_store_always_hits_transport() {
    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let client = client_with(transport.clone(), None, ClientOptions::default());

    for _ in 0..3 {
        let json = client.get_json("things", &RequestOptions::new()).await.unwrap();
        assert!(!json.is_cache_hit());
    }
    assert_eq!(transport.calls(), 3);
    assert!(!client.cache().is_active());
}

#[tokio::test]
async fn test_404_is_user_error_and_not_cached() {
    let transport = StaticTransport::new(404, r#"{"message":"not found"}"#);
    let store = RecordingStore::new();
    let client = client_with(transport.clone(), Some(store.clone()), ClientOptions::default());

    let err = client.get_json("does-not-exist", &RequestOptions::new()).await.unwrap_err();
    let api = err.as_api_error().expect("api error");
    assert_eq!(api.kind(), ApiErrorKind::UserError);
    assert_eq!(api.status(), 404);
    assert_eq!(api.message(), r#"{"message":"not found"}"#);
    assert_eq!(api.request().url().as_str(), "https://api.example.com/v1/does-not-exist");
    assert_eq!(api.request().method(), &Method::GET);
    assert!(store.sets().is_empty());

    // failure is not remembered: the next call goes back to the network
    client.get_json("does-not-exist", &RequestOptions::new()).await.unwrap_err();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_500_is_server_error_and_not_cached() {
    let transport = StaticTransport::new(500, "internal error");
    let store = RecordingStore::new();
    let client = client_with(transport, Some(store.clone()), ClientOptions::default());

    let err = client.get_json("flaky", &RequestOptions::new()).await.unwrap_err();
    match err {
        Error::Api(api) => {
            assert_eq!(api.kind(), ApiErrorKind::ServerError);
            assert_eq!(api.response().text(), "internal error");
        }
        other => panic!("expected api error, got {other:?}"),
    }
    assert!(store.sets().is_empty());
}

#[tokio::test]
async fn test_status_outside_known_ranges_is_unknown_status() {
    let transport = StaticTransport::new(0, "");
    let store = RecordingStore::new();
    let client = client_with(transport, Some(store.clone()), ClientOptions::default());

    let err = client.get_json("odd", &RequestOptions::new()).await.unwrap_err();
    assert_eq!(err.as_api_error().map(|e| e.kind()), Some(ApiErrorKind::UnknownStatus));
    assert!(store.sets().is_empty());
}

#[tokio::test]
async fn test_post_never_touches_cache() {
    for status in [200u16, 201, 404, 500] {
        let transport = StaticTransport::new(status, r#"{"ok":true}"#);
        let store = RecordingStore::new();
        let client = client_with(transport.clone(), Some(store.clone()), ClientOptions::default());

        let request = client
            .build_request(Method::POST, "votes")
            .unwrap()
            .with_json(&serde_json::json!({"value": 1}))
            .unwrap();
        for _ in 0..2 {
            let response = client.request(&request, &RequestOptions::new()).await.unwrap();
            assert_eq!(response.status(), status);
            assert!(!response.is_cache_hit());
        }
        assert_eq!(transport.calls(), 2);
        assert_eq!(store.gets(), 0);
        assert!(store.sets().is_empty());
        assert_eq!(transport.last_request().unwrap().method(), &Method::POST);
    }
}

#[tokio::test]
async fn test_get_json_decodes_body() {
    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let client = client_with(transport, None, ClientOptions::default());
    let json = client.get_json("things", &RequestOptions::new()).await.unwrap();
    assert_eq!(json.data, Some(serde_json::json!({"a": 1})));
}

#[tokio::test]
async fn test_get_json_unparsable_or_null_is_absent() {
    for body in ["not json", "null", ""] {
        let transport = StaticTransport::new(200, body);
        let client = client_with(transport, None, ClientOptions::default());
        let json = client.get_json("things", &RequestOptions::new()).await.unwrap();
        assert!(json.data.is_none(), "body {:?}", body);
        assert_eq!(json.response.text(), body);
    }
}

#[tokio::test]
async fn test_get_json_as_typed() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Thing {
        a: i64,
    }

    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let client = client_with(transport, None, ClientOptions::default());
    let typed = client.get_json_as::<Thing>("things", &RequestOptions::new()).await.unwrap();
    assert_eq!(typed.data, Some(Thing { a: 1 }));

    let wrong = client.get_json_as::<Vec<String>>("things", &RequestOptions::new()).await;
    assert!(matches!(wrong, Err(Error::Serialization(_))));
}

#[tokio::test]
async fn test_ttl_absent_everywhere_resolves_to_zero() {
    let transport = StaticTransport::new(200, "{}");
    let store = RecordingStore::new();
    let client = client_with(transport.clone(), Some(store.clone()), ClientOptions::empty());

    client.get_json("things", &RequestOptions::new()).await.unwrap();
    assert_eq!(store.sets()[0].1, Duration::ZERO);

    // zero lifetime in the memory store means nothing is served back
    let again = client.get_json("things", &RequestOptions::new()).await.unwrap();
    assert!(!again.is_cache_hit());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_transport_failure_propagates_unchanged() {
    let store = RecordingStore::new();
    let client = ApiClient::builder(BASE)
        .transport(Arc::new(FailingTransport))
        .store(store.clone())
        .build()
        .unwrap();
    let err = client.get_json("things", &RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(store.sets().is_empty());
}

#[tokio::test]
async fn test_cache_key_matches_generator() {
    let transport = StaticTransport::new(200, "{}");
    let store = RecordingStore::new();
    let client = client_with(transport, Some(store.clone()), ClientOptions::default());
    client.get_json("things?page=2", &RequestOptions::new()).await.unwrap();

    let request = DefaultRequestBuilder::new()
        .build(Method::GET, "https://other-host.example.com/v1/things?page=2")
        .unwrap();
    let expected = CacheKeyGenerator::new().generate(&request);
    assert_eq!(store.sets()[0].0, expected.hash);
}

#[tokio::test]
async fn test_disabled_cache_config_skips_store() {
    let transport = StaticTransport::new(200, "{}");
    let store = Arc::new(MemoryStore::new(8));
    let client = ApiClient::builder(BASE)
        .transport(transport.clone())
        .store(store.clone())
        .cache_config(CacheConfig::new().with_enabled(false))
        .build()
        .unwrap();
    client.get_json("things", &RequestOptions::new()).await.unwrap();
    client.get_json("things", &RequestOptions::new()).await.unwrap();
    assert_eq!(transport.calls(), 2);
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_gets_share_one_client() {
    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let store = RecordingStore::new();
    let client = client_with(transport.clone(), Some(store), ClientOptions::default());

    let calls = (0..8).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .get_json(&format!("things/{}", i % 2), &RequestOptions::new())
                .await
                .map(|j| j.data)
        })
    });
    for result in futures::future::join_all(calls).await {
        assert_eq!(result.unwrap().unwrap(), Some(serde_json::json!({"a": 1})));
    }
    assert!(transport.calls() >= 2);
    assert!(transport.calls() <= 8);
}

#[test]
fn test_invalid_base_url_rejected() {
    let err = ApiClient::builder("not a url")
        .transport(StaticTransport::new(200, "{}"))
        .build()
        .err()
        .expect("build should fail");
    assert!(matches!(err, Error::Configuration { .. }));
}

struct CatApi {
    client: ApiClient,
}

impl RestApi for CatApi {
    fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl CatApi {
    async fn random_cats(&self) -> rest_api_base::Result<Vec<serde_json::Value>> {
        let json = self
            .get_json_as::<Vec<serde_json::Value>>("images/search?limit=10", &RequestOptions::new())
            .await?;
        Ok(json.data.unwrap_or_default())
    }
}

#[tokio::test]
async fn test_rest_api_extension_builds_urls_from_base() {
    let transport = StaticTransport::new(200, r#"[{"id":"a"},{"id":"b"}]"#);
    let api = CatApi {
        client: client_with(transport.clone(), None, ClientOptions::default()),
    };
    let cats = api.random_cats().await.unwrap();
    assert_eq!(cats.len(), 2);
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.url().as_str(), "https://api.example.com/v1/images/search?limit=10");
    assert_eq!(sent.headers().get("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_unbounded_ttl_caches_without_panicking() {
    let transport = StaticTransport::new(200, r#"{"a":1}"#);
    let client = ApiClient::builder(BASE)
        .transport(transport.clone())
        .store(Arc::new(MemoryStore::new(8)))
        .options(ClientOptions::empty())
        .build()
        .unwrap();

    let first = client.get_json("things", &RequestOptions::time_to_live(u64::MAX)).await.unwrap();
    assert!(!first.is_cache_hit());
    let second = client.get_json("things", &RequestOptions::new()).await.unwrap();
    assert!(second.is_cache_hit());
    assert_eq!(transport.calls(), 1);
}
