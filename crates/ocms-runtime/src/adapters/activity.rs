//! # Activity Port Adapter
//!
//! Implements the activity outbound ports of the catalog and the submission
//! queue by appending to the shared activity log.
//!
//! ## Ports Implemented
//!
//! - `CatalogActivitySink` (oc-02): course changes and enrollments
//! - `SubmissionActivitySink` (oc-03): assignment changes, submissions, grades
//!
//! A failed append is logged and swallowed. The change it describes is
//! already persisted.

use std::sync::Arc;

use oc_02_keyed_cache::{CatalogActivitySink, CatalogEvent};
use oc_03_submission_queue::{SubmissionActivitySink, SubmissionEvent};
use oc_04_activity_log::{Activity, ActivityKind, ActivityLogApi};
use oc_telemetry::log_event;

/// Appends subsystem events to the activity log.
pub struct ActivityLogAdapter {
    log: Arc<dyn ActivityLogApi>,
}

impl ActivityLogAdapter {
    pub fn new(log: Arc<dyn ActivityLogApi>) -> Self {
        Self { log }
    }

    fn append(&self, activity: Activity) {
        let kind = activity.kind;
        match self.log.record(activity) {
            Ok(at) => log_event!(debug, "activity-log", "Activity recorded", kind = ?kind, at = %at),
            Err(e) => log_event!(warn, "activity-log", "Activity not recorded", kind = ?kind, error = %e),
        }
    }
}

impl std::fmt::Debug for ActivityLogAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLogAdapter")
            .field("entries", &self.log.len())
            .finish()
    }
}

impl CatalogActivitySink for ActivityLogAdapter {
    fn catalog_changed(&self, event: CatalogEvent) {
        let activity = match event {
            CatalogEvent::CourseCreated { course_id, title } => Activity::new(
                ActivityKind::CourseChange,
                format!("Course Created: {title} ({course_id})"),
            ),
            CatalogEvent::CourseUpdated { course_id, title } => Activity::new(
                ActivityKind::CourseChange,
                format!("Course Updated: {title} ({course_id})"),
            ),
            CatalogEvent::CourseDeactivated { course_id, title } => Activity::new(
                ActivityKind::CourseChange,
                format!("Course Deactivated: {title} ({course_id})"),
            ),
            CatalogEvent::StudentEnrolled {
                course_id,
                student_id,
            } => Activity::new(
                ActivityKind::Enrollment,
                format!("Student {student_id} Enrolled in Course {course_id}"),
            ),
            CatalogEvent::ModuleAdded {
                course_id,
                module_id,
                title,
            } => Activity::new(
                ActivityKind::CourseChange,
                format!("Module Added to Course {course_id}: {title} ({module_id})"),
            ),
            CatalogEvent::ModuleUpdated {
                course_id,
                module_id,
            } => Activity::new(
                ActivityKind::CourseChange,
                format!("Module {module_id} Updated in Course {course_id}"),
            ),
            CatalogEvent::ModuleDeleted {
                course_id,
                module_id,
            } => Activity::new(
                ActivityKind::CourseChange,
                format!("Module {module_id} Deleted from Course {course_id}"),
            ),
        };
        self.append(activity);
    }
}

impl SubmissionActivitySink for ActivityLogAdapter {
    fn submission_changed(&self, event: SubmissionEvent) {
        let activity = match event {
            SubmissionEvent::AssignmentCreated {
                assignment_id,
                course_id,
                title,
            } => Activity::new(
                ActivityKind::CourseChange,
                format!("Assignment Created in Course {course_id}: {title} ({assignment_id})"),
            ),
            SubmissionEvent::AssignmentUpdated {
                assignment_id,
                title,
            } => Activity::new(
                ActivityKind::CourseChange,
                format!("Assignment Updated: {title} ({assignment_id})"),
            ),
            SubmissionEvent::AssignmentDeactivated {
                assignment_id,
                title,
            } => Activity::new(
                ActivityKind::CourseChange,
                format!("Assignment Deactivated: {title} ({assignment_id})"),
            ),
            SubmissionEvent::Submitted {
                submission_id,
                assignment_id,
                user_id,
                late,
            } => Activity::new(
                ActivityKind::Submission,
                format!(
                    "{} {submission_id} by User {user_id} for Assignment {assignment_id}",
                    if late { "Late Submission" } else { "Submission" }
                ),
            ),
            SubmissionEvent::Graded {
                submission_id,
                user_id,
                score,
                max_score,
            } => Activity::new(
                ActivityKind::Grading,
                format!("Submission {submission_id} by User {user_id} Graded {score}/{max_score}"),
            ),
        };
        self.append(activity);
    }
}
