//! # Core Container
//!
//! Holds every stateful container of the core with process lifetime and
//! injects the persistence collaborators they wrap.
//!
//! - Each container is created once, in `CoreContainer::new`
//! - Services are shared as `Arc` and synchronize internally

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, RuntimeConfig};
pub use subsystems::{AdminSummary, CoreContainer, Repositories};
