//! Activity Recorder
//!
//! Process-wide activity log stamped by an injected clock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_types::TimeSource;
use tracing::{debug, info};

use crate::config::ActivityLogConfig;
use crate::domain::{
    Activity, ActivityLog, ActivityLogError, ActivityLogResult, ActivityReport, LogEntry,
};
use crate::ports::inbound::ActivityLogApi;

/// Activity Recorder
///
/// Appends take the write lock; queries and reports share the read lock.
pub struct ActivityRecorder {
    time: Arc<dyn TimeSource>,
    log: RwLock<ActivityLog<Activity>>,
}

impl ActivityRecorder {
    pub fn new(config: ActivityLogConfig, time: Arc<dyn TimeSource>) -> Self {
        Self {
            time,
            log: RwLock::new(ActivityLog::new(config.collision)),
        }
    }

    /// Appends `activity` at an explicit instant, e.g. when replaying.
    pub fn record_at(&self, at: DateTime<Utc>, activity: Activity) -> ActivityLogResult<()> {
        if activity.message.trim().is_empty() {
            return Err(ActivityLogError::EmptyMessage);
        }

        let kind = activity.kind;
        let replaced = self.log.write().append(at, activity);
        if let Some(previous) = replaced {
            debug!(at = %at, dropped = %previous, "Activity overwritten by a later one at the same instant");
        }
        debug!(at = %at, kind = ?kind, "Activity recorded");
        Ok(())
    }
}

impl std::fmt::Debug for ActivityRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log = self.log.read();
        f.debug_struct("ActivityRecorder")
            .field("policy", &log.policy())
            .field("entries", &log.len())
            .finish_non_exhaustive()
    }
}

impl ActivityLogApi for ActivityRecorder {
    fn log_activity(&self, message: &str) -> ActivityLogResult<DateTime<Utc>> {
        self.record(Activity::custom(message))
    }

    fn record(&self, activity: Activity) -> ActivityLogResult<DateTime<Utc>> {
        let at = self.time.now();
        self.record_at(at, activity)?;
        Ok(at)
    }

    fn range_query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<LogEntry<Activity>> {
        self.log.read().range_query(start, end)
    }

    fn snapshot_all(&self) -> Vec<LogEntry<Activity>> {
        self.log.read().snapshot_all()
    }

    fn activity_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ActivityLogResult<ActivityReport> {
        if start > end {
            return Err(ActivityLogError::InvalidRange { start, end });
        }

        let report = ActivityReport::build(&self.log.read(), start, end);
        info!(
            start = %start,
            end = %end,
            total = report.total_activities,
            days = report.activities_by_date.len(),
            "System activity report generated"
        );
        Ok(report)
    }

    fn len(&self) -> usize {
        self.log.read().len()
    }
}
