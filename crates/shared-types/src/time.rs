//! # Time Source
//!
//! Clock abstraction injected into every subsystem that stamps or compares
//! instants, so tests can pin "now".

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Abstract clock.
pub trait TimeSource: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct ManualTimeSource {
    time: RwLock<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            time: RwLock::new(initial),
        }
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.time.write() = time;
    }

    pub fn advance(&self, by: Duration) {
        let mut time = self.time.write();
        *time += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.time.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_time_source() {
        let now = SystemTimeSource.now();
        // After Jan 1, 2020
        assert!(now.timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_manual_time_source_set_and_advance() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let clock = ManualTimeSource::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now(), start + Duration::minutes(30));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
