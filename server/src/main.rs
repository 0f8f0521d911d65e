//! Docfront Server - HTTP front for a RedisJSON + RediSearch instance.
//!
//! On startup the server tunes the search module, makes sure the users index
//! exists and seeds two sample documents. It then serves `/redis/*` endpoints
//! that map query parameters one-to-one onto engine commands.

mod bootstrap;
mod config;
mod error;
mod handlers;
mod routes;
mod store;

use crate::config::Config;
use crate::store::{DocumentStore, RedisStore};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docfront_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Docfront Server on {}:{}", config.host, config.port);

    // One connection for the whole process
    let store = RedisStore::connect(&config.redis_url, config.redis_timeout).await?;
    let store: Arc<dyn DocumentStore> = Arc::new(store);

    bootstrap::run(store.as_ref(), &config).await;

    let state = AppState { store };

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
