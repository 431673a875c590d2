//! # Time-Ordered Activity Log
//!
//! Key-sorted record of system activity supporting append, inclusive
//! range queries and day-bucketed reports.
//!
//! ## Semantics
//!
//! - Entries are keyed by the instant they were appended.
//! - Two appends at the same instant overwrite by default; the
//!   `Retain` collision policy keeps both (key becomes instant + sequence).
//! - `range_query(start, end)` is inclusive on both ends and seeks to
//!   `start` in logarithmic time.
//!
//! ## Architecture
//!
//! - **Domain**: `ActivityLog<P>`, `Activity`, `ActivityReport`, `ActivityLogError`
//! - **Ports**: Inbound (`ActivityLogApi`) and the injected `TimeSource`
//! - **Application**: `ActivityRecorder`

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::ActivityRecorder;
pub use config::{ActivityLogConfig, CollisionPolicy};
pub use domain::*;
pub use ports::inbound::ActivityLogApi;
