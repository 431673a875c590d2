//! Inbound Ports (Driving Ports / API)

use chrono::{DateTime, Utc};
use shared_types::{
    Assignment, AssignmentId, AssignmentUpdate, CourseId, Grade, NewAssignment, NewSubmission,
    Submission, SubmissionId, UserId,
};

use crate::domain::{AssignmentStatistics, SubmissionResult};

/// Submission intake, processing order and grading.
pub trait SubmissionQueueApi: Send + Sync {
    /// Persists an assignment for an existing course.
    fn create_assignment(&self, request: NewAssignment) -> SubmissionResult<Assignment>;

    fn get_assignment(&self, id: AssignmentId) -> SubmissionResult<Assignment>;

    /// Active assignments of a course.
    fn assignments_by_course(&self, course_id: CourseId) -> SubmissionResult<Vec<Assignment>>;

    /// Every assignment, inactive ones included.
    fn all_assignments(&self) -> SubmissionResult<Vec<Assignment>>;

    /// Applies `update`. Submissions already queued keep the due date they
    /// were submitted against.
    fn update_assignment(
        &self,
        id: AssignmentId,
        update: AssignmentUpdate,
    ) -> SubmissionResult<Assignment>;

    /// Soft delete. Idempotent; later submissions fail with
    /// `AssignmentInactive`.
    fn delete_assignment(&self, id: AssignmentId) -> SubmissionResult<Assignment>;

    /// Active assignments whose due date has passed.
    fn overdue_assignments(&self) -> SubmissionResult<Vec<Assignment>>;

    /// Active assignments due in `[start, end]`. Empty when `start > end`.
    fn assignments_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SubmissionResult<Vec<Assignment>>;

    /// Validates, persists, then enqueues the submission.
    ///
    /// The submission is retrievable from the repository before it is
    /// visible in the queue.
    fn submit_assignment(&self, request: NewSubmission) -> SubmissionResult<Submission>;

    /// Dequeues the earliest-due pending submission; `None` when nothing is
    /// pending.
    fn next_submission_to_process(&self) -> Option<Submission>;

    /// Submissions currently waiting in the queue.
    fn pending_count(&self) -> usize;

    /// Ungraded submissions of an assignment, read from the repository.
    /// The queue is not consulted and not consumed.
    fn pending_submissions(&self, assignment_id: AssignmentId) -> SubmissionResult<Vec<Submission>>;

    /// Records a score in `[0, max_score]` and feedback.
    fn grade_submission(&self, id: SubmissionId, grade: Grade) -> SubmissionResult<Submission>;

    fn get_submission(&self, id: SubmissionId) -> SubmissionResult<Submission>;

    fn submissions_by_assignment(&self, assignment_id: AssignmentId) -> SubmissionResult<Vec<Submission>>;

    fn submissions_by_user(&self, user_id: UserId) -> SubmissionResult<Vec<Submission>>;

    fn graded_submissions(&self, assignment_id: AssignmentId) -> SubmissionResult<Vec<Submission>>;

    fn assignment_statistics(&self, assignment_id: AssignmentId) -> SubmissionResult<AssignmentStatistics>;
}
