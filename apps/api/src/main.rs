mod compile;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod parser;
mod resume;
mod routes;
mod state;
mod store;
mod tailoring;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::embedding::Embedder;
use crate::store::retriever::{Retriever, StoreRetriever};
use crate::store::ContentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the content store (local sqlite-backed vector index)
    let pool = create_pool(&config.store_path).await?;
    let store = Arc::new(ContentStore::new(pool, Embedder::new()));
    store.init().await?;

    // Retrieval policy over the store
    let retriever: Arc<dyn Retriever> = Arc::new(StoreRetriever::new(store.clone()));

    // Generative client
    let llm = LlmClient::new(
        config.openrouter_api_key.clone(),
        config.openrouter_base_url.clone(),
    );
    info!("LLM client initialized ({})", config.openrouter_base_url);

    // Build app state
    let state = AppState {
        store,
        retriever,
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
