//! Arena Chat - tuition enquiry chat service
//!
//! Serves a single conversation with an always-answering assistant: replies
//! come from the backend proxy, then the provider directly, then a local
//! keyword simulator.

mod api;
mod config;
mod fallback;
mod knowledge;
mod llm;
mod pipeline;
mod resolver;
mod runtime;
mod state_machine;

use api::{create_router, AppState, ChatProxy, SharedRuntime};
use config::AppConfig;
use fallback::LocalSimulator;
use knowledge::KnowledgeBase;
use llm::OpenAIClient;
use pipeline::ResponsePipeline;
use resolver::{BackendTier, DirectTier, ReplyTier};
use runtime::ReplyResolver;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arena_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();

    let knowledge = Arc::new(match &config.knowledge_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading knowledge base");
            KnowledgeBase::load(path)?
        }
        None => KnowledgeBase::arena_tuition(),
    });

    let shutdown = CancellationToken::new();

    // Reply tiers, tried in order
    let backend = BackendTier::new(
        OpenAIClient::new(&config.backend_url, config.request_timeout)?,
        knowledge.clone(),
    );

    let direct_client = match &config.client_api_key {
        Some(key) => Some(
            OpenAIClient::new(&config.provider_url, config.request_timeout)?
                .with_bearer(key)
                .with_model(&config.model),
        ),
        None => None,
    };
    let direct = DirectTier::new(direct_client, knowledge.clone());
    if !direct.is_configured() {
        tracing::warn!("No client credential configured. Set ARENA_CLIENT_API_KEY to enable direct replies.");
    }

    let tiers: Vec<Arc<dyn ReplyTier>> = vec![Arc::new(backend), Arc::new(direct)];
    let simulator = LocalSimulator::new(knowledge.clone(), config.simulator_delay, shutdown.clone());
    let resolver: Arc<dyn ReplyResolver> = Arc::new(ResponsePipeline::new(tiers, simulator));

    // Server side of the backend tier
    let proxy_client = match &config.server_api_key {
        Some(key) => Some(
            OpenAIClient::new(&config.provider_url, config.request_timeout)?
                .with_bearer(key)
                .with_model(&config.model),
        ),
        None => None,
    };
    let proxy = ChatProxy::new(proxy_client, knowledge.clone());
    if !proxy.is_configured() {
        tracing::warn!("No server credential configured. Set OPENAI_API_KEY to enable the proxy.");
    }

    tracing::info!(
        backend = %config.backend_url,
        provider = %config.provider_url,
        model = %config.model,
        "Reply pipeline initialized"
    );

    // Create application state
    let runtime = Arc::new(SharedRuntime::new(&knowledge.greeting, resolver));
    let state = AppState::new(runtime, proxy, shutdown.clone());

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Arena Chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, cancelling `shutdown` so pending simulator delays end
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
    shutdown.cancel();
}
