//! Configuration for the Keyed Cache Layer

use serde::{Deserialize, Serialize};

/// Cache configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Rebuild a course's module sequence from source when the cached
    /// sequence is empty, not only when it is absent
    pub rebuild_empty_sequences: bool,
    /// Load the module sequence of every active course at start-up
    pub prefetch_module_sequences: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rebuild_empty_sequences: true,
            prefetch_module_sequences: false,
        }
    }
}
