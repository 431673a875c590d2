//! Ports for the Activity Log

pub mod inbound;

pub use inbound::*;
pub use shared_types::TimeSource;
