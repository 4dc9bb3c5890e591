//! Tally gateway binary.
//!
//! - Config: `TALLY_CONFIG` (default `tally.yaml`), strict parsing
//! - Logging: `RUST_LOG` filter, default `info`
//! - Shutdown: SIGINT/SIGTERM flips readiness to draining, waits
//!   `gateway.drain_grace_ms`, then stops accepting

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tally_core::error::{Result, TallyError};
use tally_gateway::{app_state::AppState, config, router};

const DEFAULT_CONFIG_PATH: &str = "tally.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::var("TALLY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;
    let grace = cfg.gateway.drain_grace();

    let state = AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TallyError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, config = %path, "tally-gateway starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, grace))
        .await
        .map_err(|e| TallyError::Internal(format!("server failed: {e}")))?;

    tracing::info!("tally-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState, grace: Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state.set_draining();
    tracing::info!(grace_ms = grace.as_millis() as u64, "signal received, draining");
    tokio::time::sleep(grace).await;
}
