mod config;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::jsearch::JSearchClient;
use crate::llm_client::LlmClient;
use crate::matching::scorer::{LlmMatchScorer, MatchScorer, SkillOverlapScorer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobscout API v{}", env!("CARGO_PKG_VERSION"));

    // Pick the match scorer backend
    let scorer: Arc<dyn MatchScorer> = match &config.anthropic_api_key {
        Some(api_key) => {
            info!("Match scorer: LLM-refined (model: {})", llm_client::MODEL);
            Arc::new(LlmMatchScorer::new(LlmClient::new(api_key.clone())))
        }
        None => {
            info!("Match scorer: skill overlap only (ANTHROPIC_API_KEY not set)");
            Arc::new(SkillOverlapScorer)
        }
    };

    // Initialize the JSearch client
    let jobs = config.rapidapi_key.clone().map(JSearchClient::new);
    match &jobs {
        Some(_) => info!("JSearch client initialized"),
        None => info!("Jobs API disabled (RAPIDAPI_KEY not set)"),
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        scorer,
        jobs,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
