//! Telemetry configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Instance label, distinguishes processes of one deployment
    pub instance: String,

    /// Log level filter (trace, debug, info, warn, error) or directive list
    pub log_level: String,

    /// Whether to write events to stdout
    pub console_output: bool,

    /// Whether to format events as JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ocms".to_string(),
            instance: "local".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: ocms)
    /// - `OCMS_INSTANCE`: Instance label (default: local)
    /// - `OCMS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `OCMS_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `OCMS_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),

            instance: lookup("OCMS_INSTANCE").unwrap_or(defaults.instance),

            log_level: lookup("OCMS_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("OCMS_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("OCMS_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Service name qualified with the instance label.
    pub fn full_service_name(&self) -> String {
        if self.instance == "local" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.instance)
        }
    }
}
