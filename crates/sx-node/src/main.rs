//! # Stirixi Attestation Node
//!
//! Anchors engineer score snapshots on the ledger and serves them over HTTP.

use anyhow::{Context, Result};
use stirixi_telemetry::init_telemetry;
use sx_node::{NodeConfig, ServiceContainer, VERSION};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Failed to load configuration")?;

    let _telemetry =
        init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Stirixi Attestation Node v{}", VERSION);
    info!("===========================================");

    let container = ServiceContainer::build(config).context("Failed to wire subsystems")?;
    let gateway = container.gateway().context("Failed to create API gateway")?;

    info!(
        addr = %gateway.config().http_addr(),
        issuer = %container.identity.address(),
        "Node is running. Press Ctrl+C to stop."
    );

    gateway
        .run(shutdown_signal())
        .await
        .context("API gateway failed")?;

    info!("Node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C; shutting down");
    }
    info!("Received shutdown signal");
}
