//! Error types for the Activity Log

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityLogError {
    /// Activity message is blank
    #[error("Activity message is empty")]
    EmptyMessage,

    /// Report requested with `start` after `end`
    #[error("Invalid range: {start} is after {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

pub type ActivityLogResult<T> = Result<T, ActivityLogError>;
