//! # Port Adapters
//!
//! Implementations of the subsystems' outbound ports that delegate to other
//! containers held by the runtime.

pub mod activity;

pub use activity::ActivityLogAdapter;
