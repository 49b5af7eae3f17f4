use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_match::config::Config;
use resume_match::llm_client::GeminiClient;
use resume_match::routes::build_router;
use resume_match::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "resume_match={0},resume_match_api={0},tower_http={0}",
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-match API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_none() {
        error!("GEMINI_API_KEY is not set in environment variables; analysis requests will fail");
    }

    let gemini = GeminiClient::new(&config);
    info!("Gemini client initialized (model: {})", gemini.model());

    let state = AppState {
        generator: Arc::new(gemini),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
