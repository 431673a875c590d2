//! Domain module for the Keyed Cache Layer
//!
//! Contains the generic keyed cache, its statistics, and errors.

pub mod errors;
pub mod keyed_cache;

pub use errors::*;
pub use keyed_cache::*;
