//! System activity report

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activity::Activity;
use super::log::{ActivityLog, LogEntry};

/// Activities within a window, with per-day counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_activities: usize,
    pub activities: Vec<LogEntry<Activity>>,
    /// Serialized as `yyyy-MM-dd` keys
    pub activities_by_date: BTreeMap<NaiveDate, usize>,
}

impl ActivityReport {
    /// Snapshot of `[start, end]` taken from one consistent view of `log`.
    pub fn build(log: &ActivityLog<Activity>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let activities = log.range_query(start, end);
        Self {
            start,
            end,
            total_activities: activities.len(),
            activities,
            activities_by_date: log.counts_by_day(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollisionPolicy;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_report_serializes_day_keys() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let mut log = ActivityLog::new(CollisionPolicy::Overwrite);
        log.append(at, Activity::custom("hello"));

        let report = ActivityReport::build(&log, at, at);
        assert_eq!(report.total_activities, 1);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["activities_by_date"]["2024-03-01"], 1);
    }

    #[test]
    fn test_day_counts_match_listed_activities() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();
        let mut log = ActivityLog::new(CollisionPolicy::Retain);
        for hours in [0, 0, 2, 30] {
            log.append(at + Duration::hours(hours), Activity::custom("tick"));
        }

        let report = ActivityReport::build(&log, at, at + Duration::hours(2));
        assert_eq!(report.total_activities, 3);
        assert_eq!(
            report.activities_by_date.values().sum::<usize>(),
            report.activities.len()
        );
        assert_eq!(report.activities_by_date.len(), 2);
    }
}
