//! echo-gateway server entry point.
//!
//! Loads configuration, builds the route table and serves HTTP and
//! WebSocket traffic until SIGINT/SIGTERM.

use tracing_subscriber::EnvFilter;

use echo_gateway::api;
use echo_gateway::app_state::AppState;
use echo_gateway::config::{LogFormat, ServiceConfig};
use echo_gateway::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        static_root = %config.static_root.display(),
        idle_timeout = ?config.session.idle_timeout,
        "starting echo-gateway"
    );

    // Build route table and application state
    let state = AppState::from_config(&config)?;
    for route in state.router.list() {
        tracing::debug!(method = %route.method, pattern = route.pattern, "route");
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    api::serve(listener, state, shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}
