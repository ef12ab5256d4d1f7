//! Phrasebook Chat REST API Server
//!
//! ## Usage
//!
//! ```bash
//! EXPLORE_CHAT_DATA=data/sesotho.json cargo run --bin chat_server --features server
//!
//! curl -X POST http://localhost:3000/api/chat/ \
//!   -H "Content-Type: application/json" \
//!   -d '{"message": "How do I say hello in Sesotho"}'
//!
//! curl http://localhost:3000/api/health
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use explore_chat::api::create_chat_router;
use explore_chat::{
    load_store, ChatEngine, ChatService, EngineConfig, InMemoryRuleStore, TracingChatLog,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "explore_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("EXPLORE_CHAT_CONFIG") {
        Ok(path) => EngineConfig::from_yaml_file(&path)
            .with_context(|| format!("Failed to load config {}", path))?,
        Err(_) => EngineConfig::default(),
    };
    config.validate()?;

    let store = match &config.data_path {
        Some(path) => {
            let (store, summary) = load_store(path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            info!(items = summary.items, path = %path.display(), "Dataset loaded");
            store
        }
        None => {
            warn!("No dataset configured; every message gets the fallback reply");
            InMemoryRuleStore::new()
        }
    };

    let engine = ChatEngine::new(Arc::new(store)).with_fuzzy_threshold(config.fuzzy_threshold);
    let service = ChatService::new(engine, Arc::new(TracingChatLog));

    let app = create_chat_router(service)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Chat server listening on http://{}", addr);
    info!("  POST http://{}/api/chat/", addr);
    info!("  GET  http://{}/api/health", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
