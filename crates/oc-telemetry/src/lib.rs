//! # OCMS Telemetry
//!
//! Structured logging bootstrap for the course-management core.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oc_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `ocms` | Service name on every event |
//! | `OCMS_INSTANCE` | `local` | Instance label |
//! | `OCMS_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `OCMS_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `OCMS_JSON_LOGS` | `false` | JSON formatting (default on in containers) |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Info-level span tagged with `subsystem`.
///
/// ```rust,ignore
/// let span = oc_telemetry::subsystem_span!("admin_summary", "runtime", interval_secs = 300);
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $subsystem:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name, subsystem = $subsystem $(, $($field)*)?)
    };
}
