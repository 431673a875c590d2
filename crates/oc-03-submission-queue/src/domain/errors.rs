//! Error types for the Submission Processing Queue

use chrono::{DateTime, Utc};
use shared_types::{AssignmentId, RepositoryError, UserId};
use thiserror::Error;

/// All errors that can occur while submitting or grading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// Referenced assignment, user, course or submission does not exist
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// One submission per user and assignment
    #[error("User {user_id} has already submitted assignment {assignment_id}")]
    AlreadySubmitted {
        assignment_id: AssignmentId,
        user_id: UserId,
    },

    /// Submitted after the due date while late submissions are refused
    #[error("Assignment deadline has passed: {assignment_id} was due {due_date}")]
    DeadlinePassed {
        assignment_id: AssignmentId,
        due_date: DateTime<Utc>,
    },

    /// Assignment has been soft deleted
    #[error("Assignment is not active: {0}")]
    AssignmentInactive(AssignmentId),

    /// Grade outside `[0, max_score]`
    #[error("Score out of range: {score} not in [0, {max_score}]")]
    ScoreOutOfRange { score: f64, max_score: f64 },

    /// Queue reached `max_pending`
    #[error("Submission queue is full: {capacity} pending")]
    QueueFull { capacity: usize },

    /// Request rejected before reaching the source
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Repository uniqueness rule violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Repository failure
    #[error("Repository error: {0}")]
    Backend(String),
}

impl SubmissionError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<RepositoryError> for SubmissionError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, key } => Self::NotFound { entity, key },
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::Backend(msg) => Self::Backend(msg),
        }
    }
}

/// Result alias for submission operations.
pub type SubmissionResult<T> = Result<T, SubmissionError>;
