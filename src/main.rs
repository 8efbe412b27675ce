//! Check Cache - HTTP sidecar
//!
//! Exposes the check cache to callers that perform remote authorization
//! checks over a small JSON API.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use check_cache::{api::create_router, spawn_flush_task, AppState, Config};

/// Main entry point for the check cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the check cache with configured options
/// 4. Start the periodic flush task (skipped when caching is disabled)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM stop flushing and drain the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "check_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting check cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: num_entries={}, expiration_ms={}, flush_interval_ms={}, port={}",
        config.num_entries, config.expiration_ms, config.flush_interval_ms, config.server_port
    );

    let state = AppState::from_config(&config);
    if state.cache.is_enabled() {
        info!("Check cache initialized");
    } else {
        warn!("Check cache disabled, every check will be forwarded upstream");
    }

    let flush_handle = spawn_flush_task(state.cache.clone());

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(flush_handle))
        .await
        .context("server error")?;

    state.cache.flush_all();
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the flush task.
async fn shutdown_signal(flush_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    if let Some(handle) = flush_handle {
        handle.abort();
        warn!("Flush task aborted");
    }
}
