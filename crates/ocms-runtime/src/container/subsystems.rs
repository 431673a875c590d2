//! # Container Wiring
//!
//! Builds every stateful container once and hands out shared references.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Repositories, time source (injected)
//! Level 1: Activity log (time source only)
//! Level 2: User directory (users)
//! Level 3: Course catalog (courses, modules, enrollments, users, activity log)
//! Level 4: Submission queue (assignments, submissions, users, courses, activity log)
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use oc_02_keyed_cache::{
    CacheResult, CacheStats, CatalogRepositories, CourseCatalog, CourseCatalogApi, UserDirectory,
    UserDirectoryApi,
};
use oc_03_submission_queue::{SubmissionQueueApi, SubmissionRepositories, SubmissionService};
use oc_04_activity_log::{ActivityLogApi, ActivityRecorder};
use shared_types::{
    AssignmentRepository, CourseRepository, EnrollmentRepository, InMemoryStore,
    ModuleRepository, SubmissionRepository, SystemTimeSource, TimeSource, UserRepository,
};

use crate::adapters::ActivityLogAdapter;
use crate::container::config::RuntimeConfig;

/// Persistence collaborators injected into the containers.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub modules: Arc<dyn ModuleRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

impl From<&InMemoryStore> for Repositories {
    fn from(store: &InMemoryStore) -> Self {
        Self {
            users: store.users.clone(),
            courses: store.courses.clone(),
            modules: store.modules.clone(),
            enrollments: store.enrollments.clone(),
            assignments: store.assignments.clone(),
            submissions: store.submissions.clone(),
        }
    }
}

impl Repositories {
    fn catalog(&self) -> CatalogRepositories {
        CatalogRepositories {
            courses: Arc::clone(&self.courses),
            modules: Arc::clone(&self.modules),
            enrollments: Arc::clone(&self.enrollments),
            users: Arc::clone(&self.users),
        }
    }

    fn submission(&self) -> SubmissionRepositories {
        SubmissionRepositories {
            assignments: Arc::clone(&self.assignments),
            submissions: Arc::clone(&self.submissions),
            users: Arc::clone(&self.users),
            courses: Arc::clone(&self.courses),
        }
    }
}

/// Sizes and counters of every container, for admin inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub user_cache: CacheStats,
    pub enrollment_cache: CacheStats,
    pub module_cache: CacheStats,
    pub pending_submissions: usize,
    pub activity_entries: usize,
}

/// Central container holding all core services.
pub struct CoreContainer {
    /// Username to user cache.
    pub users: Arc<UserDirectory>,

    /// Enrollment and module-sequence caches.
    pub catalog: Arc<CourseCatalog>,

    /// Due-date ordered submission queue.
    pub submissions: Arc<SubmissionService>,

    /// Time-ordered activity log.
    pub activity: Arc<ActivityRecorder>,

    /// Clock shared by every container.
    pub time: Arc<dyn TimeSource>,

    /// Runtime configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl CoreContainer {
    /// Create the container with the system clock.
    pub fn new(config: RuntimeConfig, repositories: Repositories) -> Self {
        Self::with_time_source(config, repositories, Arc::new(SystemTimeSource))
    }

    /// Create the container with an injected clock.
    #[instrument(name = "container_init", skip_all)]
    pub fn with_time_source(
        config: RuntimeConfig,
        repositories: Repositories,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        info!("Initializing OCMS core container");

        let activity = Arc::new(ActivityRecorder::new(
            config.activity.clone(),
            Arc::clone(&time),
        ));
        let activity_adapter = Arc::new(ActivityLogAdapter::new(activity.clone()));
        info!(collision = ?config.activity.collision, "  [1] Activity log initialized");

        let users = Arc::new(UserDirectory::new(Arc::clone(&repositories.users)));
        info!("  [2] User directory initialized");

        let catalog = Arc::new(
            CourseCatalog::new(
                config.cache.clone(),
                repositories.catalog(),
                Arc::clone(&time),
            )
            .with_activity_sink(activity_adapter.clone()),
        );
        info!(
            rebuild_empty = config.cache.rebuild_empty_sequences,
            "  [3] Course catalog initialized"
        );

        let submissions = Arc::new(
            SubmissionService::new(
                config.submissions.clone(),
                repositories.submission(),
                Arc::clone(&time),
            )
            .with_activity_sink(activity_adapter),
        );
        info!(
            max_pending = config.submissions.max_pending,
            accept_late = config.submissions.accept_late,
            "  [4] Submission queue initialized"
        );

        Self {
            users,
            catalog,
            submissions,
            activity,
            time,
            config,
        }
    }

    /// Create a container over fresh in-memory repositories.
    pub fn in_memory(config: RuntimeConfig) -> (Self, InMemoryStore) {
        let store = InMemoryStore::new();
        let container = Self::new(config, Repositories::from(&store));
        (container, store)
    }

    /// Prefetches module sequences when configured. Returns the number loaded.
    pub fn warm_up(&self) -> CacheResult<usize> {
        self.catalog.warm_up()
    }

    pub fn admin_summary(&self) -> AdminSummary {
        AdminSummary {
            user_cache: self.users.cache_stats(),
            enrollment_cache: self.catalog.enrollment_cache_stats(),
            module_cache: self.catalog.module_cache_stats(),
            pending_submissions: self.submissions.pending_count(),
            activity_entries: self.activity.len(),
        }
    }
}

impl std::fmt::Debug for CoreContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreContainer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{NewUser, UserRole};

    #[test]
    fn test_container_initialization() {
        let (container, _store) = CoreContainer::in_memory(RuntimeConfig::default());
        let summary = container.admin_summary();

        assert_eq!(summary.pending_submissions, 0);
        assert_eq!(summary.activity_entries, 0);
        assert_eq!(summary.user_cache.entries, 0);
    }

    #[test]
    fn test_services_share_repositories() {
        let (container, store) = CoreContainer::in_memory(RuntimeConfig::default());
        container
            .users
            .register_user(NewUser {
                username: "ada".into(),
                email: "ada@example.org".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                role: UserRole::Instructor,
            })
            .unwrap();

        assert_eq!(store.users.len(), 1);
        assert_eq!(container.admin_summary().user_cache.entries, 1);
    }

    #[test]
    fn test_catalog_changes_reach_activity_log() {
        use oc_04_activity_log::ActivityKind;
        use shared_types::NewCourse;

        let (container, _store) = CoreContainer::in_memory(RuntimeConfig::default());
        let instructor = container
            .users
            .register_user(NewUser {
                username: "ada".into(),
                email: "ada@example.org".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                role: UserRole::Instructor,
            })
            .unwrap();
        container
            .catalog
            .create_course(NewCourse {
                title: "Engines".into(),
                description: String::new(),
                instructor_id: instructor.id,
            })
            .unwrap();

        let entries = container.activity.snapshot_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].payload.kind, ActivityKind::CourseChange);
        assert!(entries[0].payload.message.contains("Engines"));
    }

    #[test]
    fn test_warm_up_disabled_by_default() {
        let (container, _store) = CoreContainer::in_memory(RuntimeConfig::default());
        assert_eq!(container.warm_up().unwrap(), 0);
    }
}
