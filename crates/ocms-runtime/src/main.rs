//! # OCMS Core Runtime
//!
//! Entry point: configuration, telemetry, container, then wait for Ctrl-C.

use anyhow::{Context, Result};
use oc_telemetry::init_tracing;
use tracing::info;

use ocms_runtime::{CoreContainer, OcmsRuntime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.telemetry).context("Failed to initialize telemetry")?;

    // Persistence is in-memory until a database adapter is wired in.
    let (container, _store) = CoreContainer::in_memory(config);

    let runtime = OcmsRuntime::new(container);
    runtime.start().await?;

    info!("OCMS core is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
