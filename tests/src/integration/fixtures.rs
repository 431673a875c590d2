//! Shared setup for the integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use oc_02_keyed_cache::{CourseCatalogApi, UserDirectoryApi};
use ocms_runtime::{CoreContainer, Repositories, RuntimeConfig};
use shared_types::{
    Course, InMemoryStore, ManualTimeSource, Module, NewCourse, NewModule, NewUser, User,
    UserRole,
};

pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub struct Harness {
    pub core: Arc<CoreContainer>,
    pub store: InMemoryStore,
    pub clock: Arc<ManualTimeSource>,
}

impl Harness {
    pub fn new(config: RuntimeConfig) -> Self {
        let store = InMemoryStore::new();
        let clock = Arc::new(ManualTimeSource::new(utc(2024, 1, 1)));
        let core = CoreContainer::with_time_source(config, Repositories::from(&store), clock.clone());
        Self {
            core: Arc::new(core),
            store,
            clock,
        }
    }

    pub fn user(&self, username: &str, role: UserRole) -> User {
        self.core
            .users
            .register_user(NewUser {
                username: username.into(),
                email: format!("{username}@example.org"),
                first_name: username.into(),
                last_name: "Tester".into(),
                role,
            })
            .unwrap()
    }

    pub fn course(&self, title: &str, instructor: &User) -> Course {
        self.core
            .catalog
            .create_course(NewCourse {
                title: title.into(),
                description: format!("{title} description"),
                instructor_id: instructor.id,
            })
            .unwrap()
    }

    pub fn module(&self, course: &Course, title: &str, order: i32) -> Module {
        self.core
            .catalog
            .add_module(NewModule {
                course_id: course.id,
                title: title.into(),
                content: String::new(),
                order,
            })
            .unwrap()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
