//! impsrv-api - Import Source Microservice
//!
//! Accepts base64-encoded file payloads over HTTP, validates and
//! decodes them, and stages them under the service root folder for
//! later import processing.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use impsrv_api::AppState;
use impsrv_common::{StagingArea, VarStaging};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting impsrv-api (Import Source) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve root folder (CLI arg > env > config file > default)
    let cli_root = std::env::args().nth(1);
    let root_folder = impsrv_common::config::resolve_root_folder(cli_root.as_deref());
    info!("Root folder: {}", root_folder.display());

    // Step 2: Create staging directory if missing
    let staging = VarStaging::create(&root_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize staging directory: {}", e))?;
    info!("Staging directory: {}", staging.root().display());

    // Create application state
    let state = AppState::new(Arc::new(staging));

    // Build router
    let app = impsrv_api::build_router(state);

    // Start server
    let port = impsrv_common::config::resolve_port();
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
