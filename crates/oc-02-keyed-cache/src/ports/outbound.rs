//! Outbound Ports (Driven Ports / SPI)
//!
//! The caches wrap the persistence collaborators defined in `shared-types`.
//! They are called synchronously and their inputs are treated as already
//! validated.
//!
//! Persisted catalog changes are reported through [`CatalogActivitySink`].

use std::sync::Arc;

pub use shared_types::{
    CourseRepository, EnrollmentRepository, ModuleRepository, TimeSource, UserRepository,
};
use shared_types::{CourseId, ModuleId, UserId};

/// Collaborators required by [`crate::CourseCatalog`].
#[derive(Clone)]
pub struct CatalogRepositories {
    pub courses: Arc<dyn CourseRepository>,
    pub modules: Arc<dyn ModuleRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for CatalogRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogRepositories").finish_non_exhaustive()
    }
}

/// A catalog change that has already been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    CourseCreated { course_id: CourseId, title: String },
    CourseUpdated { course_id: CourseId, title: String },
    CourseDeactivated { course_id: CourseId, title: String },
    StudentEnrolled { course_id: CourseId, student_id: UserId },
    ModuleAdded { course_id: CourseId, module_id: ModuleId, title: String },
    ModuleUpdated { course_id: CourseId, module_id: ModuleId },
    ModuleDeleted { course_id: CourseId, module_id: ModuleId },
}

/// Receives catalog changes after they are persisted and cached.
///
/// Implementations must not call back into the catalog; events are
/// delivered after the cache lock is released but on the caller's thread.
pub trait CatalogActivitySink: Send + Sync {
    fn catalog_changed(&self, event: CatalogEvent);
}

/// Sink that drops every event. Used when no activity log is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardCatalogActivity;

impl CatalogActivitySink for DiscardCatalogActivity {
    fn catalog_changed(&self, _event: CatalogEvent) {}
}
