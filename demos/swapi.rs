//! Star Wars API with an in-memory cache and a short per-call lifetime.
//!
//! Usage:
//!   cargo run --example swapi -- 1

use rest_api_base::cache::MemoryStore;
use rest_api_base::{ApiClient, ClientOptions, RequestOptions, RestApi};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct Person {
    name: String,
    height: String,
    birth_year: String,
}

struct Swapi {
    client: ApiClient,
}

impl RestApi for Swapi {
    fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl Swapi {
    fn new(options: ClientOptions) -> rest_api_base::Result<Self> {
        let client = ApiClient::builder("https://swapi.dev/api/")
            .options(options)
            .store(Arc::new(MemoryStore::new(256)))
            .build()?;
        Ok(Self { client })
    }

    async fn person_by_id(&self, id: &str) -> rest_api_base::Result<Option<Person>> {
        let json = self
            .get_json_as(&format!("people/{}/", id), &RequestOptions::time_to_live(60))
            .await?;
        Ok(json.data)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let id = std::env::args().nth(1).unwrap_or_else(|| "1".to_string());
    let options = match std::env::var("SWAPI_OPTIONS") {
        Ok(path) => ClientOptions::from_yaml_file(path)?,
        Err(_) => ClientOptions::from_env(),
    };
    let api = Swapi::new(options)?;

    match api.person_by_id(&id).await? {
        Some(p) => println!("{} ({}cm, born {})", p.name, p.height, p.birth_year),
        None => println!("no person {}", id),
    }

    let again = api.client().get_json(&format!("people/{}/", id), &RequestOptions::new()).await?;
    println!("second lookup cache hit? {}", again.is_cache_hit());
    println!("{:?}", api.client().cache().stats());

    Ok(())
}
