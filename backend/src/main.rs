//! Ingres Groundwater Assistant - Backend Server

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ingres_backend::{config::Config, create_app, external::GeminiClient, AppState};
use shared::Dataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ingres_server=debug,ingres_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().context("failed to load configuration")?;

    tracing::info!("Starting Ingres Groundwater Assistant");
    tracing::info!("Environment: {}", config.environment);

    let dataset = Dataset::embedded();
    tracing::info!(
        "Loaded {} records for {} districts ({}-{})",
        dataset.records().len(),
        dataset.districts().len(),
        dataset.earliest_year(),
        dataset.latest_year()
    );

    let llm = GeminiClient::new(&config.gemini)?;
    tracing::info!("Using model {}", llm.model());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server host/port")?;

    // Create application state
    let state = AppState::new(config, dataset, Arc::new(llm));

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
