//! Outbound Ports (Driven Ports / SPI)
//!
//! Repositories for coursework state, and [`SubmissionActivitySink`] for
//! reporting what changed.

use std::sync::Arc;

pub use shared_types::{
    AssignmentRepository, CourseRepository, SubmissionRepository, TimeSource, UserRepository,
};
use shared_types::{AssignmentId, CourseId, SubmissionId, UserId};

/// Collaborators required by [`crate::SubmissionService`].
#[derive(Clone)]
pub struct SubmissionRepositories {
    pub assignments: Arc<dyn AssignmentRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl std::fmt::Debug for SubmissionRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionRepositories").finish_non_exhaustive()
    }
}

/// Coursework change that has already been persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    AssignmentCreated {
        assignment_id: AssignmentId,
        course_id: CourseId,
        title: String,
    },
    AssignmentUpdated {
        assignment_id: AssignmentId,
        title: String,
    },
    AssignmentDeactivated {
        assignment_id: AssignmentId,
        title: String,
    },
    Submitted {
        submission_id: SubmissionId,
        assignment_id: AssignmentId,
        user_id: UserId,
        late: bool,
    },
    Graded {
        submission_id: SubmissionId,
        user_id: UserId,
        score: f64,
        max_score: f64,
    },
}

/// Receives coursework changes after they are persisted.
///
/// Called with no service lock held.
pub trait SubmissionActivitySink: Send + Sync {
    fn submission_changed(&self, event: SubmissionEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSubmissionActivity;

impl SubmissionActivitySink for DiscardSubmissionActivity {
    fn submission_changed(&self, _event: SubmissionEvent) {}
}
