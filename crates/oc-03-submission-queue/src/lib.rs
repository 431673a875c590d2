//! # Submission Processing Queue
//!
//! Answers "which submission should be processed next": pending
//! submissions wait in a [`SortedPriorityQueue`](oc_01_collections::SortedPriorityQueue)
//! ordered by their assignment's due date, earliest first.
//!
//! ## Rules
//!
//! - Persist, then enqueue. A submission is never visible in the queue
//!   before it can be read back from the repository.
//! - Dequeuing from an empty queue yields `None`; it is not a failure.
//! - The queue cannot be listed. "Pending without consuming" is served by
//!   the repository's ungraded query instead.
//!
//! ## Architecture
//!
//! - **Domain**: `by_due_date` ordering, `AssignmentStatistics`, `SubmissionError`
//! - **Ports**: Inbound (`SubmissionQueueApi`) and Outbound (repositories,
//!   `TimeSource`, `SubmissionActivitySink`)
//! - **Application**: `SubmissionService`

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::SubmissionService;
pub use config::SubmissionQueueConfig;
pub use domain::*;
pub use ports::inbound::SubmissionQueueApi;
pub use ports::outbound::{
    DiscardSubmissionActivity, SubmissionActivitySink, SubmissionEvent, SubmissionRepositories,
};
