//! # Runtime Configuration
//!
//! Unified configuration for all containers and runtime parameters.
//!
//! Every section has defaults; `OCMS_*` environment variables override them.
//! Malformed values are rejected rather than ignored.

use oc_02_keyed_cache::CacheConfig;
use oc_03_submission_queue::SubmissionQueueConfig;
use oc_04_activity_log::{ActivityLogConfig, CollisionPolicy};
use oc_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Keyed cache layer configuration.
    pub cache: CacheConfig,
    /// Submission queue configuration.
    pub submissions: SubmissionQueueConfig,
    /// Activity log configuration.
    pub activity: ActivityLogConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Seconds between admin summaries in the log. Zero disables them.
    pub summary_interval_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            submissions: SubmissionQueueConfig::default(),
            activity: ActivityLogConfig::default(),
            telemetry: TelemetryConfig::default(),
            summary_interval_secs: 300,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Malformed value for {variable}: {value:?}")]
    Malformed { variable: String, value: String },

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OCMS_REBUILD_EMPTY_SEQUENCES`: bool
    /// - `OCMS_PREFETCH_MODULES`: bool
    /// - `OCMS_ACCEPT_LATE`: bool
    /// - `OCMS_MAX_PENDING`: positive integer
    /// - `OCMS_ACTIVITY_COLLISION`: `overwrite` or `retain`
    /// - `OCMS_SUMMARY_INTERVAL_SECS`: integer, 0 disables
    ///
    /// Logging variables are documented on [`TelemetryConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(v) = parse_bool(&lookup, "OCMS_REBUILD_EMPTY_SEQUENCES")? {
            config.cache.rebuild_empty_sequences = v;
        }
        if let Some(v) = parse_bool(&lookup, "OCMS_PREFETCH_MODULES")? {
            config.cache.prefetch_module_sequences = v;
        }
        if let Some(v) = parse_bool(&lookup, "OCMS_ACCEPT_LATE")? {
            config.submissions.accept_late = v;
        }
        if let Some(v) = parse_number(&lookup, "OCMS_MAX_PENDING")? {
            config.submissions.max_pending = v;
        }
        if let Some(v) = parse_number(&lookup, "OCMS_SUMMARY_INTERVAL_SECS")? {
            config.summary_interval_secs = v;
        }
        if let Some(value) = lookup("OCMS_ACTIVITY_COLLISION") {
            config.activity.collision = match value.to_lowercase().as_str() {
                "overwrite" => CollisionPolicy::Overwrite,
                "retain" => CollisionPolicy::Retain,
                _ => return Err(malformed("OCMS_ACTIVITY_COLLISION", value)),
            };
        }

        Ok(config)
    }

    /// Reject settings the containers cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submissions.max_pending == 0 {
            return Err(ConfigError::Invalid {
                field: "submissions.max_pending",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.telemetry.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "telemetry.log_level",
                reason: "must not be empty".to_string(),
            });
        }
        if self.telemetry.service_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "telemetry.service_name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn malformed(variable: &str, value: String) -> ConfigError {
    ConfigError::Malformed {
        variable: variable.to_string(),
        value,
    }
}

fn parse_bool<F>(lookup: &F, variable: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        None => Ok(None),
        Some(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(malformed(variable, value)),
        },
    }
}

fn parse_number<F, N>(lookup: &F, variable: &str) -> Result<Option<N>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    N: std::str::FromStr,
{
    match lookup(variable) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| malformed(variable, value)),
    }
}
