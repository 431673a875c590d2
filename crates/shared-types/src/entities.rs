//! # Core Domain Entities
//!
//! Defines the course-management entities that the core subsystems cache,
//! queue and log.
//!
//! ## Clusters
//!
//! - **People**: `User`, `UserRole`
//! - **Catalog**: `Course`, `Module`, `Enrollment`
//! - **Coursework**: `Assignment`, `Submission`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user.
    UserId
);
entity_id!(
    /// Identifier of a course.
    CourseId
);
entity_id!(
    /// Identifier of a course module.
    ModuleId
);
entity_id!(
    /// Identifier of a course enrollment.
    EnrollmentId
);
entity_id!(
    /// Identifier of an assignment.
    AssignmentId
);
entity_id!(
    /// Identifier of a submission.
    SubmissionId
);

// =============================================================================
// CLUSTER A: PEOPLE
// =============================================================================

/// Role a user holds in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Student,
    Instructor,
    Admin,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login name, the key of the user cache.
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Soft-delete flag.
    pub active: bool,
}

impl User {
    /// "First Last", as shown on reports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration request for a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Partial update of a user; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// CLUSTER B: CATALOG
// =============================================================================

/// A course offered by an instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub instructor_id: UserId,
    pub active: bool,
}

/// Creation request for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor_id: UserId,
}

/// Partial update of a course; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<UserId>,
}

/// One unit of course content. Modules of a course are presented in
/// ascending `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
    pub order: i32,
}

/// Creation request for a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModule {
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
    pub order: i32,
}

/// Partial update of a module; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order: Option<i32>,
}

/// Progress state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    InProgress,
    Completed,
    Dropped,
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub course_id: CourseId,
    pub student_id: UserId,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    /// 0.0 ..= 100.0
    pub completion_percentage: f64,
}

/// Creation request for an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub course_id: CourseId,
    pub student_id: UserId,
    pub enrolled_at: DateTime<Utc>,
}

// =============================================================================
// CLUSTER C: COURSEWORK
// =============================================================================

/// An assignment attached to a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub max_score: f64,
    pub active: bool,
}

/// Creation request for an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub max_score: f64,
}

/// Partial update of an assignment; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<f64>,
    /// Moves the assignment to another existing course.
    pub course_id: Option<CourseId>,
}

/// A user's submission for an assignment.
///
/// `due_date` is copied from the parent assignment when the submission is
/// created, so ordering by deadline needs no further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub assignment_id: AssignmentId,
    pub user_id: UserId,
    pub content: String,
    pub submitted_on: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded: bool,
}

/// A submission request as received from a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub assignment_id: AssignmentId,
    pub user_id: UserId,
    pub content: String,
}

/// A validated submission ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub assignment_id: AssignmentId,
    pub user_id: UserId,
    pub content: String,
    pub submitted_on: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// Grade applied to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub score: f64,
    pub feedback: Option<String>,
}
