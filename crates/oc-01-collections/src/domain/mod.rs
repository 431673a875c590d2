//! Domain module for the ordered containers
//!
//! Contains the node arena, the two containers built on it, and errors.

mod arena;
pub mod errors;
pub mod priority_queue;
pub mod sequence;

pub use errors::*;
pub use priority_queue::*;
pub use sequence::*;
