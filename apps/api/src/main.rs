mod analysis;
mod config;
mod errors;
mod models;
mod progress;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::history::load_history;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prep API v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(config.clone())?;
    info!(
        backend = ?config.storage_backend,
        history_cap = config.history_cap,
        "Storage initialized"
    );

    let history = load_history(&state.storage)?;
    info!("{} saved analyses loaded", history.entries.len());
    if let Some(warning) = history.warning {
        warn!("{warning}");
    }

    // Log every store change
    let mut events = state.storage.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(?event, "Store changed"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Store event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

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
