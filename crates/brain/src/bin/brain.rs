//! Diagnostic engine service binary.
//!
//! Standalone HTTP service that turns pipeline failure logs into structured
//! root-cause analyses via a generative-model backend.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brain::config::BrainConfig;
use brain::model::ModelClient;
use brain::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("brain=info".parse()?))
        .init();

    info!("Starting diagnostic engine service...");

    // Load configuration
    let config = BrainConfig::default();

    let model = match &config.api_key {
        Some(key) => {
            info!(model = %config.model, "Model backend configured");
            Some(Arc::new(ModelClient::new(key.clone(), config.model.clone())?))
        }
        None => {
            warn!("GOOGLE_API_KEY not set; /diagnose will answer with errors");
            None
        }
    };

    let state = AppState { model };
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind service port")?;

    info!(%addr, "Diagnostic engine listening");

    axum::serve(listener, build_router(state))
        .await
        .context("Server error")?;

    Ok(())
}
