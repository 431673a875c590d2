//! Configuration for the Activity Log

use serde::{Deserialize, Serialize};

/// What happens when two activities are appended at the same instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later append replaces the earlier entry.
    #[default]
    Overwrite,
    /// Both entries are kept, in append order.
    Retain,
}

/// Activity log configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityLogConfig {
    pub collision: CollisionPolicy,
}
