//! TipJar API Server
//!
//! Main entry point for the tip pool allocation service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tipjar_api::{AppState, create_router};
use tipjar_core::allocation::AllocationEngine;
use tipjar_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing; RUST_LOG overrides the configured filter
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.filter).context("Invalid log filter")?,
    };
    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();

    // Build the allocation engine
    let engine = AllocationEngine::from_config(&config.allocation)
        .context("Invalid allocation configuration")?;
    info!(
        denominations = ?engine.denominations().as_slice(),
        max_tip_amount = %config.allocation.max_tip_amount,
        "Allocation engine configured"
    );

    // Create router
    let app = create_router(AppState::new(engine));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
