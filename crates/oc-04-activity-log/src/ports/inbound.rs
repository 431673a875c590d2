//! Inbound Ports (Driving Ports / API)

use chrono::{DateTime, Utc};

use crate::domain::{Activity, ActivityLogResult, ActivityReport, LogEntry};

/// Shared, time-ordered record of system activity.
pub trait ActivityLogApi: Send + Sync {
    /// Appends a free-form activity at the current instant.
    fn log_activity(&self, message: &str) -> ActivityLogResult<DateTime<Utc>>;

    /// Appends `activity` at the current instant and returns that instant.
    fn record(&self, activity: Activity) -> ActivityLogResult<DateTime<Utc>>;

    /// Activities in `[start, end]`, ascending. Empty when `start > end`.
    fn range_query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<LogEntry<Activity>>;

    /// Ascending copy of the whole log.
    fn snapshot_all(&self) -> Vec<LogEntry<Activity>>;

    /// Activities in `[start, end]` grouped by day.
    fn activity_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ActivityLogResult<ActivityReport>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
