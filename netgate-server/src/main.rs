//! netgate-server
//!
//! REST front end that relays CLI commands to one network device over SSH.

use std::sync::Arc;

use anyhow::Context;
use log::{error, info};
use netgate::SshDeviceAdapter;
use netgate_server::{Config, create_router, logging};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    info!("Starting netgate-server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    info!(
        "Configuration loaded: listen={} device={}:{} ({})",
        config.server.bind_addr(),
        config.device.host,
        config.device.port,
        config.device.device_type
    );

    let bind_addr = config.server.bind_addr();
    let adapter = Arc::new(SshDeviceAdapter::new(config.device.into_device_config()));
    let app = create_router(adapter);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
