//! Inbound Ports (Driving Ports / API)
//!
//! Every mutation method returns the fresh value and refreshes or
//! invalidates the affected cache entry before returning.

use std::collections::BTreeMap;

use oc_01_collections::OrderedSequence;
use shared_types::{
    Course, CourseId, CourseUpdate, Enrollment, Module, ModuleId, ModuleUpdate, NewCourse,
    NewModule, NewUser, User, UserId, UserRole, UserUpdate,
};

use crate::domain::{CacheResult, CacheStats};

/// Username keyed user lookups.
pub trait UserDirectoryApi: Send + Sync {
    /// Cached lookup by username.
    fn get_user_by_username(&self, username: &str) -> CacheResult<User>;

    /// Uncached lookup by id.
    fn get_user_by_id(&self, id: UserId) -> CacheResult<User>;

    fn users_by_role(&self, role: UserRole) -> CacheResult<Vec<User>>;

    /// Every stored user, inactive ones included. Bypasses the cache.
    fn all_users(&self) -> CacheResult<Vec<User>>;

    /// Persists a new user and caches it. Username and email must be unused.
    fn register_user(&self, request: NewUser) -> CacheResult<User>;

    /// Applies `update` and refreshes the cached entry.
    fn update_user(&self, id: UserId, update: UserUpdate) -> CacheResult<User>;

    /// Soft delete; the cached entry is removed.
    fn deactivate_user(&self, id: UserId) -> CacheResult<User>;

    fn invalidate(&self, username: &str) -> bool;

    fn clear_cache(&self);

    fn snapshot_all(&self) -> BTreeMap<String, User>;

    fn cache_stats(&self) -> CacheStats;
}

/// Course keyed enrollment and module-sequence caches.
pub trait CourseCatalogApi: Send + Sync {
    fn get_course(&self, id: CourseId) -> CacheResult<Course>;

    fn active_courses(&self) -> CacheResult<Vec<Course>>;

    fn courses_by_instructor(&self, instructor_id: UserId) -> CacheResult<Vec<Course>>;

    /// Active courses the student is enrolled in, in enrollment order.
    fn courses_by_student(&self, student_id: UserId) -> CacheResult<Vec<Course>>;

    /// Persists a course and seeds an empty module sequence for it.
    fn create_course(&self, request: NewCourse) -> CacheResult<Course>;

    /// Applies `update`. Both cached entries of the course are dropped and
    /// reload on the next read.
    fn update_course(&self, id: CourseId, update: CourseUpdate) -> CacheResult<Course>;

    /// Soft delete; both cached entries of the course are removed.
    fn deactivate_course(&self, id: CourseId) -> CacheResult<Course>;

    /// Cached enrollment list of a course.
    fn get_enrollments_by_course(&self, course_id: CourseId) -> CacheResult<Vec<Enrollment>>;

    /// Enrolls a student and refreshes the course's enrollment entry.
    fn enroll_student(&self, course_id: CourseId, student_id: UserId) -> CacheResult<Enrollment>;

    fn invalidate_enrollments(&self, course_id: CourseId) -> bool;

    fn enrollment_snapshot(&self) -> BTreeMap<CourseId, Vec<Enrollment>>;

    /// Cached module sequence, rebuilt from source when absent or empty.
    fn get_module_sequence(&self, course_id: CourseId) -> CacheResult<OrderedSequence<Module>>;

    /// Uncached ordered module list.
    fn modules_by_course(&self, course_id: CourseId) -> CacheResult<Vec<Module>>;

    fn get_module(&self, id: ModuleId) -> CacheResult<Module>;

    /// Persists a module and appends it to the course's sequence.
    fn add_module(&self, request: NewModule) -> CacheResult<Module>;

    /// Persists the update and rebuilds the course's sequence.
    fn update_module(&self, id: ModuleId, update: ModuleUpdate) -> CacheResult<Module>;

    /// Deletes the module and rebuilds the course's sequence.
    fn delete_module(&self, id: ModuleId) -> CacheResult<()>;

    fn module_sequence_snapshot(&self) -> BTreeMap<CourseId, OrderedSequence<Module>>;

    fn enrollment_cache_stats(&self) -> CacheStats;

    fn module_cache_stats(&self) -> CacheStats;
}
