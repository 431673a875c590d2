//! Ports for the Submission Processing Queue

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
