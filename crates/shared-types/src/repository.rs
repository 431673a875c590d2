//! # Persistence Collaborators
//!
//! Outbound ports every core subsystem depends on. Implementations own the
//! durable state; the core treats their inputs as already validated and
//! calls them synchronously.
//!
//! Lookups return `Ok(None)` for a missing entity. Mutations of a missing
//! entity return `RepositoryError::NotFound`.

use chrono::{DateTime, Utc};

use crate::entities::{
    Assignment, AssignmentId, Course, CourseId, Enrollment, Module, ModuleId, NewAssignment,
    NewCourse, NewEnrollment, NewModule, NewUser, Submission, SubmissionDraft, SubmissionId, User,
    UserId, UserRole,
};
use crate::errors::RepositoryResult;

/// User persistence.
pub trait UserRepository: Send + Sync {
    /// Persists a new user and returns it with its assigned id.
    fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    /// Overwrites an existing user.
    fn update(&self, user: User) -> RepositoryResult<User>;

    fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;

    fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    fn exists_by_username(&self, username: &str) -> RepositoryResult<bool>;

    fn exists_by_email(&self, email: &str) -> RepositoryResult<bool>;

    fn find_by_role(&self, role: UserRole) -> RepositoryResult<Vec<User>>;

    /// Every user, ascending by id, inactive ones included.
    fn find_all(&self) -> RepositoryResult<Vec<User>>;
}

/// Course persistence.
pub trait CourseRepository: Send + Sync {
    fn insert(&self, course: NewCourse) -> RepositoryResult<Course>;

    fn update(&self, course: Course) -> RepositoryResult<Course>;

    fn find_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;

    /// Active courses, ascending by id.
    fn find_active(&self) -> RepositoryResult<Vec<Course>>;

    /// Active courses taught by `instructor_id`.
    fn find_by_instructor(&self, instructor_id: UserId) -> RepositoryResult<Vec<Course>>;
}

/// Module persistence.
pub trait ModuleRepository: Send + Sync {
    fn insert(&self, module: NewModule) -> RepositoryResult<Module>;

    fn update(&self, module: Module) -> RepositoryResult<Module>;

    fn delete(&self, id: ModuleId) -> RepositoryResult<()>;

    fn find_by_id(&self, id: ModuleId) -> RepositoryResult<Option<Module>>;

    /// Modules of a course ascending by `order`, ties broken by id.
    fn find_by_course_ordered(&self, course_id: CourseId) -> RepositoryResult<Vec<Module>>;
}

/// Enrollment persistence.
pub trait EnrollmentRepository: Send + Sync {
    fn insert(&self, enrollment: NewEnrollment) -> RepositoryResult<Enrollment>;

    fn update(&self, enrollment: Enrollment) -> RepositoryResult<Enrollment>;

    fn exists(&self, course_id: CourseId, student_id: UserId) -> RepositoryResult<bool>;

    /// Enrollments of a course, ascending by id.
    fn find_by_course(&self, course_id: CourseId) -> RepositoryResult<Vec<Enrollment>>;

    /// Enrollments of a student, ascending by id.
    fn find_by_student(&self, student_id: UserId) -> RepositoryResult<Vec<Enrollment>>;
}

/// Assignment persistence.
pub trait AssignmentRepository: Send + Sync {
    fn insert(&self, assignment: NewAssignment) -> RepositoryResult<Assignment>;

    fn update(&self, assignment: Assignment) -> RepositoryResult<Assignment>;

    fn find_by_id(&self, id: AssignmentId) -> RepositoryResult<Option<Assignment>>;

    /// Active assignments of a course.
    fn find_by_course(&self, course_id: CourseId) -> RepositoryResult<Vec<Assignment>>;

    /// Every assignment, ascending by id, inactive ones included.
    fn find_all(&self) -> RepositoryResult<Vec<Assignment>>;

    /// Active assignments whose due date is strictly before `now`.
    fn find_overdue(&self, now: DateTime<Utc>) -> RepositoryResult<Vec<Assignment>>;

    /// Active assignments due within `[start, end]`, both ends inclusive.
    fn find_by_due_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Assignment>>;
}

/// Submission persistence.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, draft: SubmissionDraft) -> RepositoryResult<Submission>;

    fn update(&self, submission: Submission) -> RepositoryResult<Submission>;

    fn find_by_id(&self, id: SubmissionId) -> RepositoryResult<Option<Submission>>;

    fn find_by_assignment_and_user(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Submission>>;

    fn find_by_assignment(&self, assignment_id: AssignmentId) -> RepositoryResult<Vec<Submission>>;

    fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Submission>>;

    /// Submissions of an assignment that have not been graded yet.
    fn find_ungraded_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> RepositoryResult<Vec<Submission>>;

    fn find_graded_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> RepositoryResult<Vec<Submission>>;
}
