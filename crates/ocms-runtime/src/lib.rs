//! # OCMS Runtime
//!
//! Process-level composition of the course-management core.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the core container with dependency injection
//! - `adapters/` - outbound port implementations bridging the subsystems
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Validate it
//! 3. Initialize telemetry
//! 4. Build every container once (user directory, course catalog,
//!    submission queue, activity log)
//! 5. Prefetch module sequences when configured
//! 6. Spawn the periodic admin summary
//! 7. Signal ready, wait for Ctrl-C, log the final summary

pub mod adapters;
pub mod container;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use oc_telemetry::{log_event, subsystem_span};
use tokio::sync::watch;
use tracing::{error, info, Instrument};

pub use adapters::ActivityLogAdapter;
pub use container::{AdminSummary, ConfigError, CoreContainer, Repositories, RuntimeConfig};

/// The runtime owning the core container and its background tasks.
pub struct OcmsRuntime {
    container: Arc<CoreContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl OcmsRuntime {
    pub fn new(container: CoreContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Prefetch caches and start background tasks.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  OCMS Core Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let prefetched = self
            .container
            .warm_up()
            .context("Failed to prefetch module sequences")?;
        if prefetched > 0 {
            info!(courses = prefetched, "Module sequences prefetched");
        }

        self.spawn_summary_task();

        info!("All core containers initialized and running");
        Ok(())
    }

    fn spawn_summary_task(&self) {
        let interval_secs = self.container.config.summary_interval_secs;
        if interval_secs == 0 {
            return;
        }

        let container = Arc::clone(&self.container);
        let mut shutdown = self.shutdown_rx.clone();
        let span = subsystem_span!("admin_summary", "runtime", interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => log_summary(&container.admin_summary()),
                    _ = shutdown.changed() => {
                        info!("Summary task received shutdown signal");
                        break;
                    }
                }
            }
        }.instrument(span));
    }

    /// Signal background tasks and log the final summary.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        tokio::task::yield_now().await;

        log_summary(&self.container.admin_summary());
        info!("Shutdown complete");
    }

    pub fn container(&self) -> Arc<CoreContainer> {
        Arc::clone(&self.container)
    }
}

fn log_summary(summary: &AdminSummary) {
    match serde_json::to_string(summary) {
        Ok(json) => log_event!(
            info,
            "runtime",
            "Admin summary",
            pending = summary.pending_submissions,
            activities = summary.activity_entries,
            summary = %json
        ),
        Err(e) => error!("Failed to serialize admin summary: {}", e),
    }
}
