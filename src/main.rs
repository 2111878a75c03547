//! Feature Flags - A feature flag configuration service
//!
//! Stores global features and per-user overrides and serves them over HTTP
//! through a read-through TTL cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feature_flags::{api::create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the feature flag server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Open the JSON store and wrap it in the cache when enabled
/// 4. Start the background cache purge task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feature_flags=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting feature flag server");

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: cache_enabled={}, cache_ttl={}s, cleanup_interval={}s, data_file={}",
        config.cache_enabled,
        config.cache_ttl_seconds,
        config.cleanup_interval,
        config.data_file.display()
    );

    let state = AppState::from_config(&config)
        .await
        .context("failed to open feature store")?;
    info!("Feature store initialized");

    let cleanup_handle = match &state.cache {
        Some(cache) if config.cleanup_interval > 0 => {
            info!("Background cache purge task started");
            Some(spawn_cleanup_task(cache.clone(), config.cleanup_interval))
        }
        _ => None,
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.server_port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.server_port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the purge task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cache purge task aborted");
    }
}
