//! # Shared Types Crate
//!
//! Course-management entities, the persistence collaborator traits, and the
//! clock abstraction shared by every core subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Collaborators, not storage**: Subsystems own caches and queues; durable
//!   state lives behind the `repository` traits.
//! - **Injected time**: Anything that compares against "now" takes a
//!   `TimeSource`.

pub mod entities;
pub mod errors;
pub mod in_memory;
pub mod repository;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use in_memory::*;
pub use repository::*;
pub use time::*;
