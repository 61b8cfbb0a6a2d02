mod config;
mod documents;
mod embedding;
mod errors;
mod offers;
mod routes;
mod scheduling;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::create_encoder;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Build the sentence encoder once; model loading can block, keep it off the runtime
    let backend = config.embedding_backend;
    let dimension = config.embedding_dimension;
    let encoder = tokio::task::spawn_blocking(move || create_encoder(backend, dimension)).await??;
    info!(
        "Sentence encoder initialized (backend: {}, dimension: {})",
        encoder.name(),
        encoder.dimension()
    );

    std::fs::create_dir_all(&config.offer_letter_dir)?;
    info!("Offer letters go to {}", config.offer_letter_dir.display());

    let state = AppState {
        config: config.clone(),
        encoder,
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
