//! Domain module for the Submission Processing Queue
//!
//! Contains the due-date ordering, statistics, and errors.

pub mod errors;
pub mod ordering;
pub mod value_objects;

pub use errors::*;
pub use ordering::*;
pub use value_objects::*;
