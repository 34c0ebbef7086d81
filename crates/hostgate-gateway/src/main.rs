//! hostgate gateway binary.
//!
//! - Config: `HOSTGATE_CONFIG` (default `hostgate.yaml`) + env overrides
//! - Host policy HTTP API on `gateway.listen`
//! - Graceful shutdown on Ctrl-C

use tracing_subscriber::{fmt, EnvFilter};

use hostgate_core::{HostgateError, Result};
use hostgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "hostgate-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let state = app_state::AppState::new(cfg)?;
    let listen = state.cfg().gateway.listen_addr()?;

    let app = router::build_router(state);

    tracing::info!(%listen, "hostgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| HostgateError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HostgateError::Internal(format!("server failed: {e}")))?;

    tracing::info!("hostgate-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}
