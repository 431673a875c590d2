//! Submission Processing Service
//!
//! Owns the due-date ordered processing queue.
//!
//! Intake pipeline:
//! 1. Assignment and user must exist, assignment must be active
//! 2. One submission per (assignment, user)
//! 3. Reject past-due unless `accept_late`
//! 4. Reject when `max_pending` submissions are waiting
//! 5. Persist
//! 6. Enqueue
//!
//! Steps 2 through 6 run under the queue lock, so concurrent duplicate
//! submissions cannot both pass the uniqueness check.
//!
//! Assignments are never removed. Deleting one clears its `active` flag,
//! after which it accepts no submissions and drops out of every listing
//! except [`SubmissionQueueApi::all_assignments`].

use std::sync::Arc;

use parking_lot::Mutex;
use chrono::{DateTime, Utc};
use shared_types::{
    Assignment, AssignmentId, AssignmentUpdate, CourseId, Grade, NewAssignment, NewSubmission,
    Submission, SubmissionDraft, SubmissionId, TimeSource, UserId,
};
use tracing::{debug, info, warn};

use crate::config::SubmissionQueueConfig;
use crate::domain::{
    processing_queue, AssignmentStatistics, ProcessingQueue, SubmissionError, SubmissionResult,
};
use crate::ports::inbound::SubmissionQueueApi;
use crate::ports::outbound::{
    DiscardSubmissionActivity, SubmissionActivitySink, SubmissionEvent, SubmissionRepositories,
};

/// Submission Processing Service
pub struct SubmissionService {
    config: SubmissionQueueConfig,
    repos: SubmissionRepositories,
    time: Arc<dyn TimeSource>,
    activity: Arc<dyn SubmissionActivitySink>,
    queue: Mutex<ProcessingQueue>,
}

impl SubmissionService {
    pub fn new(
        config: SubmissionQueueConfig,
        repos: SubmissionRepositories,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            repos,
            time,
            activity: Arc::new(DiscardSubmissionActivity),
            queue: Mutex::new(processing_queue()),
        }
    }

    /// Reports persisted changes to `sink` instead of discarding them.
    pub fn with_activity_sink(mut self, sink: Arc<dyn SubmissionActivitySink>) -> Self {
        self.activity = sink;
        self
    }

    pub fn config(&self) -> &SubmissionQueueConfig {
        &self.config
    }

    fn load_assignment(&self, id: AssignmentId) -> SubmissionResult<Assignment> {
        self.repos
            .assignments
            .find_by_id(id)?
            .ok_or_else(|| SubmissionError::not_found("Assignment", id))
    }

    fn load_submission(&self, id: SubmissionId) -> SubmissionResult<Submission> {
        self.repos
            .submissions
            .find_by_id(id)?
            .ok_or_else(|| SubmissionError::not_found("Submission", id))
    }

    fn ensure_user(&self, id: UserId) -> SubmissionResult<()> {
        match self.repos.users.find_by_id(id)? {
            Some(_) => Ok(()),
            None => Err(SubmissionError::not_found("User", id)),
        }
    }

    fn ensure_course(&self, id: CourseId) -> SubmissionResult<()> {
        match self.repos.courses.find_by_id(id)? {
            Some(_) => Ok(()),
            None => Err(SubmissionError::not_found("Course", id)),
        }
    }

    fn validate_title(title: &str) -> SubmissionResult<()> {
        if title.trim().is_empty() {
            return Err(SubmissionError::InvalidRequest(
                "assignment title is empty".into(),
            ));
        }
        Ok(())
    }

    fn validate_max_score(max_score: f64) -> SubmissionResult<()> {
        if !max_score.is_finite() || max_score <= 0.0 {
            return Err(SubmissionError::InvalidRequest(format!(
                "max score must be positive and finite, got {max_score}"
            )));
        }
        Ok(())
    }

    fn report(&self, event: SubmissionEvent) {
        self.activity.submission_changed(event);
    }
}

impl std::fmt::Debug for SubmissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionService")
            .field("config", &self.config)
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl SubmissionQueueApi for SubmissionService {
    fn create_assignment(&self, request: NewAssignment) -> SubmissionResult<Assignment> {
        Self::validate_title(&request.title)?;
        Self::validate_max_score(request.max_score)?;
        self.ensure_course(request.course_id)?;

        let assignment = self.repos.assignments.insert(request)?;
        info!(
            assignment_id = %assignment.id,
            course_id = %assignment.course_id,
            due_date = %assignment.due_date,
            "Assignment created"
        );
        self.report(SubmissionEvent::AssignmentCreated {
            assignment_id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title.clone(),
        });
        Ok(assignment)
    }

    fn get_assignment(&self, id: AssignmentId) -> SubmissionResult<Assignment> {
        self.load_assignment(id)
    }

    fn assignments_by_course(&self, course_id: CourseId) -> SubmissionResult<Vec<Assignment>> {
        Ok(self.repos.assignments.find_by_course(course_id)?)
    }

    fn all_assignments(&self) -> SubmissionResult<Vec<Assignment>> {
        Ok(self.repos.assignments.find_all()?)
    }

    fn update_assignment(
        &self,
        id: AssignmentId,
        update: AssignmentUpdate,
    ) -> SubmissionResult<Assignment> {
        if let Some(title) = &update.title {
            Self::validate_title(title)?;
        }
        if let Some(max_score) = update.max_score {
            Self::validate_max_score(max_score)?;
        }
        if let Some(course_id) = update.course_id {
            self.ensure_course(course_id)?;
        }

        let mut assignment = self.load_assignment(id)?;
        if let Some(title) = update.title {
            assignment.title = title;
        }
        if let Some(description) = update.description {
            assignment.description = description;
        }
        if let Some(due_date) = update.due_date {
            assignment.due_date = due_date;
        }
        if let Some(max_score) = update.max_score {
            assignment.max_score = max_score;
        }
        if let Some(course_id) = update.course_id {
            assignment.course_id = course_id;
        }

        let assignment = self.repos.assignments.update(assignment)?;
        info!(
            assignment_id = %assignment.id,
            course_id = %assignment.course_id,
            due_date = %assignment.due_date,
            "Assignment updated"
        );
        self.report(SubmissionEvent::AssignmentUpdated {
            assignment_id: assignment.id,
            title: assignment.title.clone(),
        });
        Ok(assignment)
    }

    fn delete_assignment(&self, id: AssignmentId) -> SubmissionResult<Assignment> {
        let mut assignment = self.load_assignment(id)?;
        if !assignment.active {
            debug!(assignment_id = %id, "Assignment already inactive");
            return Ok(assignment);
        }

        assignment.active = false;
        let assignment = self.repos.assignments.update(assignment)?;
        info!(assignment_id = %id, "Assignment deactivated");
        self.report(SubmissionEvent::AssignmentDeactivated {
            assignment_id: id,
            title: assignment.title.clone(),
        });
        Ok(assignment)
    }

    fn overdue_assignments(&self) -> SubmissionResult<Vec<Assignment>> {
        Ok(self.repos.assignments.find_overdue(self.time.now())?)
    }

    fn assignments_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SubmissionResult<Vec<Assignment>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.repos.assignments.find_by_due_range(start, end)?)
    }

    fn submit_assignment(&self, request: NewSubmission) -> SubmissionResult<Submission> {
        // 1. Referenced entities
        let assignment = self.load_assignment(request.assignment_id)?;
        if !assignment.active {
            return Err(SubmissionError::AssignmentInactive(assignment.id));
        }
        self.ensure_user(request.user_id)?;

        let mut queue = self.queue.lock();

        // 2. Uniqueness
        if self
            .repos
            .submissions
            .find_by_assignment_and_user(request.assignment_id, request.user_id)?
            .is_some()
        {
            return Err(SubmissionError::AlreadySubmitted {
                assignment_id: request.assignment_id,
                user_id: request.user_id,
            });
        }

        // 3. Deadline
        let now = self.time.now();
        let late = now > assignment.due_date;
        if late {
            if !self.config.accept_late {
                return Err(SubmissionError::DeadlinePassed {
                    assignment_id: assignment.id,
                    due_date: assignment.due_date,
                });
            }
            warn!(
                assignment_id = %assignment.id,
                user_id = %request.user_id,
                due_date = %assignment.due_date,
                "Accepting late submission"
            );
        }

        // 4. Capacity
        if queue.size() >= self.config.max_pending {
            return Err(SubmissionError::QueueFull {
                capacity: self.config.max_pending,
            });
        }

        // 5. Persist, then 6. enqueue
        let submission = self.repos.submissions.insert(SubmissionDraft {
            assignment_id: request.assignment_id,
            user_id: request.user_id,
            content: request.content,
            submitted_on: now,
            due_date: assignment.due_date,
        })?;
        queue.enqueue(submission.clone());

        info!(
            submission_id = %submission.id,
            assignment_id = %submission.assignment_id,
            user_id = %submission.user_id,
            pending = queue.size(),
            "Submission queued for processing"
        );
        drop(queue);

        self.report(SubmissionEvent::Submitted {
            submission_id: submission.id,
            assignment_id: submission.assignment_id,
            user_id: submission.user_id,
            late,
        });
        Ok(submission)
    }

    fn next_submission_to_process(&self) -> Option<Submission> {
        let mut queue = self.queue.lock();
        let next = queue.dequeue().ok()?;
        debug!(
            submission_id = %next.id,
            due_date = %next.due_date,
            remaining = queue.size(),
            "Dequeued submission for processing"
        );
        Some(next)
    }

    fn pending_count(&self) -> usize {
        self.queue.lock().size()
    }

    fn pending_submissions(&self, assignment_id: AssignmentId) -> SubmissionResult<Vec<Submission>> {
        Ok(self
            .repos
            .submissions
            .find_ungraded_by_assignment(assignment_id)?)
    }

    fn grade_submission(&self, id: SubmissionId, grade: Grade) -> SubmissionResult<Submission> {
        let mut submission = self.load_submission(id)?;
        let assignment = self.load_assignment(submission.assignment_id)?;

        if !(0.0..=assignment.max_score).contains(&grade.score) {
            return Err(SubmissionError::ScoreOutOfRange {
                score: grade.score,
                max_score: assignment.max_score,
            });
        }

        submission.score = Some(grade.score);
        submission.feedback = grade.feedback;
        submission.graded = true;

        let submission = self.repos.submissions.update(submission)?;
        info!(
            submission_id = %submission.id,
            score = grade.score,
            max_score = assignment.max_score,
            "Submission graded"
        );
        self.report(SubmissionEvent::Graded {
            submission_id: submission.id,
            user_id: submission.user_id,
            score: grade.score,
            max_score: assignment.max_score,
        });
        Ok(submission)
    }

    fn get_submission(&self, id: SubmissionId) -> SubmissionResult<Submission> {
        self.load_submission(id)
    }

    fn submissions_by_assignment(&self, assignment_id: AssignmentId) -> SubmissionResult<Vec<Submission>> {
        Ok(self.repos.submissions.find_by_assignment(assignment_id)?)
    }

    fn submissions_by_user(&self, user_id: UserId) -> SubmissionResult<Vec<Submission>> {
        Ok(self.repos.submissions.find_by_user(user_id)?)
    }

    fn graded_submissions(&self, assignment_id: AssignmentId) -> SubmissionResult<Vec<Submission>> {
        Ok(self
            .repos
            .submissions
            .find_graded_by_assignment(assignment_id)?)
    }

    fn assignment_statistics(&self, assignment_id: AssignmentId) -> SubmissionResult<AssignmentStatistics> {
        let all = self.repos.submissions.find_by_assignment(assignment_id)?;
        let graded = self
            .repos
            .submissions
            .find_graded_by_assignment(assignment_id)?;
        Ok(AssignmentStatistics::from_lists(assignment_id, &all, &graded))
    }
}
