//! Multi-hotel stay pricing and quotation engine.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;
pub mod telemetry;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::RateCache;
use crate::config::AppConfig;
use crate::pricing::QuoteEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuoteEngine<RateCache>>,
}

impl AppState {
    pub fn new(cache: RateCache) -> Self {
        Self {
            engine: Arc::new(QuoteEngine::new(cache)),
        }
    }
}

/// Build the HTTP application
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Install telemetry, bind the configured address and serve until shutdown.
pub async fn serve(config: AppConfig) -> error::Result<()> {
    telemetry::init(&config.telemetry)?;

    let cache = RateCache::new(config.rate_cache.capacity, config.rate_cache.ttl());
    let router = app(AppState::new(cache));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "quotation engine listening");
    axum::serve(listener, router).await?;
    Ok(())
}
