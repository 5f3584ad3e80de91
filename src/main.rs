use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod dashboard;
mod db;
mod error;
mod scoreboard;

use config::{Config, StoreKind};
use dashboard::AppState;
use db::{Database, MatchStore, MemoryStore};
use scoreboard::MatchRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let store: Arc<dyn MatchStore> = match config.store {
        StoreKind::Memory => {
            warn!("Using in-memory store – matches are lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreKind::Sqlite => {
            let db = Database::open(&config.database_path)?;
            info!("Database opened: {}", config.database_path);
            Arc::new(db)
        }
    };

    let registry = MatchRegistry::new(store);
    let live = registry.in_progress_summary().await?;
    info!("{} match(es) in progress at startup", live.len());

    let app = dashboard::router(AppState {
        registry,
        summary_limit: config.summary_limit,
    });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run dashboard server (blocks until Ctrl-C)
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
