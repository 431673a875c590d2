//! Structured logging macros.
//!
//! Events raised at the runtime boundary carry a `subsystem` field naming the
//! component they concern (`keyed-cache`, `submission-queue`, `activity-log`,
//! `runtime`), so aggregated output can be split per component.

/// Emits a tracing event at `$level` tagged with `subsystem`.
///
/// ```rust,ignore
/// log_event!(warn, "activity-log", "Activity not recorded", error = %e);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:ident, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(subsystem = $subsystem, $($($field)*,)? $msg)
    };
}
