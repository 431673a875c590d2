//! Application layer

pub mod recorder;

pub use recorder::ActivityRecorder;
