//! # Keyed Cache Layer
//!
//! Write-through caches in front of the persistence collaborators.
//!
//! ## Instances
//!
//! | Service | Key | Value |
//! |---------|-----|-------|
//! | [`UserDirectory`] | username | `User` |
//! | [`CourseCatalog`] | course id | `Vec<Enrollment>` |
//! | [`CourseCatalog`] | course id | `OrderedSequence<Module>` |
//!
//! ## Consistency Model
//!
//! Read-your-writes per key, no cross-key atomicity. Each cache sits behind
//! its own `parking_lot::RwLock`. Every mutation operation persists and then
//! refreshes or invalidates its entry while holding the write lock, so a
//! reader sees either the value before the mutation or after it. Callers
//! never have to remember to invalidate.
//!
//! ## Architecture
//!
//! - **Domain**: `KeyedCache`, `SharedCache`, `CacheStats`, `CacheError`
//! - **Ports**: Inbound (`UserDirectoryApi`, `CourseCatalogApi`) and
//!   Outbound (repository traits from `shared-types`, `CatalogActivitySink`)
//! - **Application**: `UserDirectory`, `CourseCatalog`

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{CourseCatalog, UserDirectory};
pub use config::CacheConfig;
pub use domain::*;
pub use ports::inbound::{CourseCatalogApi, UserDirectoryApi};
pub use ports::outbound::{
    CatalogActivitySink, CatalogEvent, CatalogRepositories, DiscardCatalogActivity,
};
