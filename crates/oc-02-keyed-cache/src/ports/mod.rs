//! Ports for the Keyed Cache Layer

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
