//! # In-Memory Repositories
//!
//! `BTreeMap`-backed implementations of the persistence ports. Used by the
//! runtime when no external store is wired and by every test suite.
//!
//! Ids are assigned from a per-table counter starting at 1.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::entities::{
    Assignment, AssignmentId, Course, CourseId, Enrollment, EnrollmentId, EnrollmentStatus,
    Module, ModuleId, NewAssignment, NewCourse, NewEnrollment, NewModule, NewUser, Submission,
    SubmissionDraft, SubmissionId, User, UserId, UserRole,
};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AssignmentRepository, CourseRepository, EnrollmentRepository, ModuleRepository,
    SubmissionRepository, UserRepository,
};

/// One id-keyed table.
#[derive(Debug)]
struct Table<T> {
    rows: RwLock<BTreeMap<u64, T>>,
    next_id: AtomicU64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn insert_with(&self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.write().insert(id, row.clone());
        row
    }

    fn replace(&self, entity: &'static str, id: u64, row: T) -> RepositoryResult<T> {
        let mut rows = self.rows.write();
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(RepositoryError::not_found(entity, id)),
        }
    }

    fn remove(&self, entity: &'static str, id: u64) -> RepositoryResult<T> {
        self.rows
            .write()
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found(entity, id))
    }

    fn get(&self, id: u64) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.rows.read().values().find(|row| predicate(row)).cloned()
    }

    fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.read().len()
    }
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug)]
pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        if self.exists_by_username(&user.username)? {
            return Err(RepositoryError::Conflict(format!(
                "username already exists: {}",
                user.username
            )));
        }
        Ok(self.table.insert_with(|id| User {
            id: UserId(id),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            active: true,
        }))
    }

    fn update(&self, user: User) -> RepositoryResult<User> {
        self.table.replace("User", user.id.0, user)
    }

    fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.table.get(id.0))
    }

    fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        Ok(self.table.find(|u| u.username == username))
    }

    fn exists_by_username(&self, username: &str) -> RepositoryResult<bool> {
        Ok(self.table.find(|u| u.username == username).is_some())
    }

    fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.table.find(|u| u.email == email).is_some())
    }

    fn find_by_role(&self, role: UserRole) -> RepositoryResult<Vec<User>> {
        Ok(self.table.filter(|u| u.role == role))
    }

    fn find_all(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.table.filter(|_| true))
    }
}

// =============================================================================
// COURSES
// =============================================================================

#[derive(Debug)]
pub struct InMemoryCourseRepository {
    table: Table<Course>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseRepository for InMemoryCourseRepository {
    fn insert(&self, course: NewCourse) -> RepositoryResult<Course> {
        Ok(self.table.insert_with(|id| Course {
            id: CourseId(id),
            title: course.title,
            description: course.description,
            instructor_id: course.instructor_id,
            active: true,
        }))
    }

    fn update(&self, course: Course) -> RepositoryResult<Course> {
        self.table.replace("Course", course.id.0, course)
    }

    fn find_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        Ok(self.table.get(id.0))
    }

    fn find_active(&self) -> RepositoryResult<Vec<Course>> {
        Ok(self.table.filter(|c| c.active))
    }

    fn find_by_instructor(&self, instructor_id: UserId) -> RepositoryResult<Vec<Course>> {
        Ok(self
            .table
            .filter(|c| c.active && c.instructor_id == instructor_id))
    }
}

// =============================================================================
// MODULES
// =============================================================================

#[derive(Debug)]
pub struct InMemoryModuleRepository {
    table: Table<Module>,
}

impl InMemoryModuleRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryModuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRepository for InMemoryModuleRepository {
    fn insert(&self, module: NewModule) -> RepositoryResult<Module> {
        Ok(self.table.insert_with(|id| Module {
            id: ModuleId(id),
            course_id: module.course_id,
            title: module.title,
            content: module.content,
            order: module.order,
        }))
    }

    fn update(&self, module: Module) -> RepositoryResult<Module> {
        self.table.replace("Module", module.id.0, module)
    }

    fn delete(&self, id: ModuleId) -> RepositoryResult<()> {
        self.table.remove("Module", id.0).map(|_| ())
    }

    fn find_by_id(&self, id: ModuleId) -> RepositoryResult<Option<Module>> {
        Ok(self.table.get(id.0))
    }

    fn find_by_course_ordered(&self, course_id: CourseId) -> RepositoryResult<Vec<Module>> {
        let mut modules = self.table.filter(|m| m.course_id == course_id);
        modules.sort_by_key(|m| (m.order, m.id));
        Ok(modules)
    }
}

// =============================================================================
// ENROLLMENTS
// =============================================================================

#[derive(Debug)]
pub struct InMemoryEnrollmentRepository {
    table: Table<Enrollment>,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryEnrollmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentRepository for InMemoryEnrollmentRepository {
    fn insert(&self, enrollment: NewEnrollment) -> RepositoryResult<Enrollment> {
        Ok(self.table.insert_with(|id| Enrollment {
            id: EnrollmentId(id),
            course_id: enrollment.course_id,
            student_id: enrollment.student_id,
            enrolled_at: enrollment.enrolled_at,
            status: EnrollmentStatus::Enrolled,
            completion_percentage: 0.0,
        }))
    }

    fn update(&self, enrollment: Enrollment) -> RepositoryResult<Enrollment> {
        self.table.replace("Enrollment", enrollment.id.0, enrollment)
    }

    fn exists(&self, course_id: CourseId, student_id: UserId) -> RepositoryResult<bool> {
        Ok(self
            .table
            .find(|e| e.course_id == course_id && e.student_id == student_id)
            .is_some())
    }

    fn find_by_course(&self, course_id: CourseId) -> RepositoryResult<Vec<Enrollment>> {
        Ok(self.table.filter(|e| e.course_id == course_id))
    }

    fn find_by_student(&self, student_id: UserId) -> RepositoryResult<Vec<Enrollment>> {
        Ok(self.table.filter(|e| e.student_id == student_id))
    }
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

#[derive(Debug)]
pub struct InMemoryAssignmentRepository {
    table: Table<Assignment>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryAssignmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentRepository for InMemoryAssignmentRepository {
    fn insert(&self, assignment: NewAssignment) -> RepositoryResult<Assignment> {
        Ok(self.table.insert_with(|id| Assignment {
            id: AssignmentId(id),
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            max_score: assignment.max_score,
            active: true,
        }))
    }

    fn update(&self, assignment: Assignment) -> RepositoryResult<Assignment> {
        self.table.replace("Assignment", assignment.id.0, assignment)
    }

    fn find_by_id(&self, id: AssignmentId) -> RepositoryResult<Option<Assignment>> {
        Ok(self.table.get(id.0))
    }

    fn find_by_course(&self, course_id: CourseId) -> RepositoryResult<Vec<Assignment>> {
        Ok(self
            .table
            .filter(|a| a.active && a.course_id == course_id))
    }

    fn find_all(&self) -> RepositoryResult<Vec<Assignment>> {
        Ok(self.table.filter(|_| true))
    }

    fn find_overdue(&self, now: DateTime<Utc>) -> RepositoryResult<Vec<Assignment>> {
        Ok(self.table.filter(|a| a.active && a.due_date < now))
    }

    fn find_by_due_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Assignment>> {
        Ok(self
            .table
            .filter(|a| a.active && start <= a.due_date && a.due_date <= end))
    }
}

// =============================================================================
// SUBMISSIONS
// =============================================================================

#[derive(Debug)]
pub struct InMemorySubmissionRepository {
    table: Table<Submission>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySubmissionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, draft: SubmissionDraft) -> RepositoryResult<Submission> {
        Ok(self.table.insert_with(|id| Submission {
            id: SubmissionId(id),
            assignment_id: draft.assignment_id,
            user_id: draft.user_id,
            content: draft.content,
            submitted_on: draft.submitted_on,
            due_date: draft.due_date,
            score: None,
            feedback: None,
            graded: false,
        }))
    }

    fn update(&self, submission: Submission) -> RepositoryResult<Submission> {
        self.table.replace("Submission", submission.id.0, submission)
    }

    fn find_by_id(&self, id: SubmissionId) -> RepositoryResult<Option<Submission>> {
        Ok(self.table.get(id.0))
    }

    fn find_by_assignment_and_user(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
    ) -> RepositoryResult<Option<Submission>> {
        Ok(self
            .table
            .find(|s| s.assignment_id == assignment_id && s.user_id == user_id))
    }

    fn find_by_assignment(&self, assignment_id: AssignmentId) -> RepositoryResult<Vec<Submission>> {
        Ok(self.table.filter(|s| s.assignment_id == assignment_id))
    }

    fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Submission>> {
        Ok(self.table.filter(|s| s.user_id == user_id))
    }

    fn find_ungraded_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> RepositoryResult<Vec<Submission>> {
        Ok(self
            .table
            .filter(|s| s.assignment_id == assignment_id && !s.graded))
    }

    fn find_graded_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> RepositoryResult<Vec<Submission>> {
        Ok(self
            .table
            .filter(|s| s.assignment_id == assignment_id && s.graded))
    }
}

// =============================================================================
// BUNDLE
// =============================================================================

/// All in-memory repositories, shared by `Arc`.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    pub users: Arc<InMemoryUserRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
    pub modules: Arc<InMemoryModuleRepository>,
    pub enrollments: Arc<InMemoryEnrollmentRepository>,
    pub assignments: Arc<InMemoryAssignmentRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            courses: Arc::new(InMemoryCourseRepository::new()),
            modules: Arc::new(InMemoryModuleRepository::new()),
            enrollments: Arc::new(InMemoryEnrollmentRepository::new()),
            assignments: Arc::new(InMemoryAssignmentRepository::new()),
            submissions: Arc::new(InMemorySubmissionRepository::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
