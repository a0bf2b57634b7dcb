//! SAASS dashboard HTTP server binary.
//!
//! Main entry point for the dashboard REST API. It builds the repository,
//! sets up the HTTP router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run against an in-memory store seeded from a fixture
//! REPOSITORY_TYPE=local LOCAL_SEED_FILE=backend/fixtures/seed.json \
//!   cargo run --bin saass-server
//!
//! # Run against the remote data store
//! DATA_STORE_URL=https://project.supabase.co DATA_STORE_KEY=... \
//!   cargo run --bin saass-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SAASS_CONFIG`: Path to a `repository.toml` (optional)
//! - `REPOSITORY_TYPE`: `rest` or `local` when no config file is found
//! - `DATA_STORE_URL`, `DATA_STORE_KEY`: Remote store settings
//! - `DISPLAY_UTC_OFFSET_HOURS`, `DISPLAY_LEGACY_OFFSET`: Date display settings
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use saass_dashboard::db::{
    DisplaySettings, FullRepository, InventoryRepository, RepositoryConfig, RepositoryFactory,
};
use saass_dashboard::http::{create_router, AppState};
use saass_dashboard::models::time::DateFormatter;

/// Repository and formatter from `repository.toml` when present, else from the environment.
fn load_backend() -> anyhow::Result<(Arc<dyn FullRepository>, DateFormatter)> {
    match RepositoryConfig::from_default_location() {
        Ok(config) => {
            info!(
                "Using repository.toml (type = {})",
                config.repository.repo_type
            );
            let repository = RepositoryFactory::from_repository_config(&config)?;
            Ok((repository, config.formatter()?))
        }
        Err(e) => {
            info!("{}; configuring from environment", e);
            let repository = RepositoryFactory::from_env()?;
            Ok((repository, DisplaySettings::from_env().formatter()?))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting SAASS dashboard server");

    let (repository, formatter) = load_backend()?;
    match repository.health_check().await {
        Ok(true) => info!("Repository initialized successfully"),
        Ok(false) => warn!("Repository initialized but reports unhealthy"),
        Err(e) => warn!("Repository health check failed: {}", e),
    }

    let state = AppState::new(repository, formatter);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
