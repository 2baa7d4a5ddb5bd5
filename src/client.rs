//! Client surface: the base client, its builder and the dispatcher beneath it.
//!
//! Keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

mod api;
pub mod builder;
pub mod core;
pub mod dispatcher;
pub mod error_classification;
pub mod options;

pub use api::RestApi;
pub use builder::ApiClientBuilder;
pub use core::{ApiClient, JsonResponse};
pub use dispatcher::Dispatcher;
pub use error_classification::{classify, StatusClass};
pub use options::{resolve_time_to_live, ClientOptions, RequestOptions, DEFAULT_TIME_TO_LIVE};
