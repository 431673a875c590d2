//! Domain module for the Activity Log
//!
//! Contains the time-ordered log, activity payloads, reports and errors.

pub mod activity;
pub mod errors;
pub mod log;
pub mod report;

pub use activity::*;
pub use errors::*;
pub use log::*;
pub use report::*;
