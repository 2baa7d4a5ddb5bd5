//! The Cat API, cached on disk.
//!
//! Fetches ten random cats twice; the second call is served from the file
//! cache under `./cache/`. Then triggers a 404 to show error classification.
//!
//! Usage:
//!   RUST_LOG=rest_api_base=debug cargo run --example cat_api

use rest_api_base::cache::FileStore;
use rest_api_base::{ApiClient, Error, JsonResponse, RequestOptions, RestApi};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct Cat {
    id: String,
    url: String,
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
    const BASE_URL: &'static str = "https://api.thecatapi.com/v1/";

    async fn new() -> anyhow::Result<Self> {
        let store = FileStore::open("cache").await?;
        let client = ApiClient::builder(Self::BASE_URL)
            .store(Arc::new(store))
            .build()?;
        Ok(Self { client })
    }

    async fn random_10_cats(&self) -> rest_api_base::Result<JsonResponse<Vec<Cat>>> {
        self.get_json_as("images/search?limit=10", &RequestOptions::new())
            .await
    }

    async fn trigger_404(&self) -> rest_api_base::Result<JsonResponse> {
        self.get_json("does-not-exist", &RequestOptions::new()).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let api = CatApi::new().await?;

    for round in 1..=2 {
        let cats = api.random_10_cats().await?;
        println!("round {}: cache hit? {}", round, cats.is_cache_hit());
        for cat in cats.data.unwrap_or_default() {
            println!("  {} {}", cat.id, cat.url);
        }
    }

    match api.trigger_404().await {
        Err(Error::Api(e)) if e.is_user_error() => println!("\n{}\n", e.message()),
        Err(e) => return Err(e.into()),
        Ok(_) => println!("\nexpected a 404"),
    }

    Ok(())
}
