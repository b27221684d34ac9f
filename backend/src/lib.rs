//! Restaurant back-office dashboard gateway
//!
//! One JSON view endpoint per dashboard screen, computed from the remote
//! back-office REST API with the caller's staff token.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod cache;
pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use crate::cache::QueryCache;
use crate::error::AppResult;
use crate::external::BackofficeApi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: BackofficeApi,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let cache = QueryCache::new(&config.cache);
        let api = BackofficeApi::new(&config.api, cache)?;
        Ok(Self {
            api,
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Restaurant Back-Office Dashboard API v1"
}
