//! Configuration for the Submission Processing Queue

use serde::{Deserialize, Serialize};

/// Submission queue configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionQueueConfig {
    /// Accept submissions after the assignment's due date
    pub accept_late: bool,
    /// Maximum submissions waiting in the queue
    pub max_pending: usize,
}

impl Default for SubmissionQueueConfig {
    fn default() -> Self {
        Self {
            accept_late: false,
            max_pending: 10_000,
        }
    }
}
