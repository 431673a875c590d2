//! Course Catalog Service
//!
//! Two course keyed caches:
//!
//! - **Enrollments**: course id to the course's enrollment list.
//! - **Module sequences**: course id to an [`OrderedSequence`] of modules in
//!   ascending module order.
//!
//! Module deletion and reordering rebuild the whole sequence from the
//! module repository instead of editing it in place. The sequence has no
//! way to find a module's node other than a full scan, and a rebuild is
//! equally correct.
//!
//! Every persisted change is reported to the [`CatalogActivitySink`] once
//! the cache lock has been released.

use std::collections::BTreeMap;
use std::sync::Arc;

use oc_01_collections::OrderedSequence;
use shared_types::{
    Course, CourseId, CourseUpdate, Enrollment, Module, ModuleId, ModuleUpdate, NewCourse,
    NewEnrollment, NewModule, TimeSource, UserId,
};
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::domain::{CacheError, CacheResult, CacheStats, KeyedCache, SharedCache};
use crate::ports::inbound::CourseCatalogApi;
use crate::ports::outbound::{
    CatalogActivitySink, CatalogEvent, CatalogRepositories, DiscardCatalogActivity,
};

/// Cached course enrollments and module sequences.
pub struct CourseCatalog {
    config: CacheConfig,
    repos: CatalogRepositories,
    time: Arc<dyn TimeSource>,
    activity: Arc<dyn CatalogActivitySink>,
    enrollments: SharedCache<CourseId, Vec<Enrollment>>,
    sequences: SharedCache<CourseId, OrderedSequence<Module>>,
}

impl CourseCatalog {
    pub fn new(config: CacheConfig, repos: CatalogRepositories, time: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            repos,
            time,
            activity: Arc::new(DiscardCatalogActivity),
            enrollments: SharedCache::new("enrollments"),
            sequences: SharedCache::new("module_sequences"),
        }
    }

    /// Reports persisted changes to `sink` instead of discarding them.
    pub fn with_activity_sink(mut self, sink: Arc<dyn CatalogActivitySink>) -> Self {
        self.activity = sink;
        self
    }

    /// Loads the module sequence of every active course when
    /// `prefetch_module_sequences` is set. Returns the number of courses
    /// loaded.
    pub fn warm_up(&self) -> CacheResult<usize> {
        if !self.config.prefetch_module_sequences {
            return Ok(0);
        }

        let courses = self.repos.courses.find_active()?;
        let mut cache = self.sequences.write();
        for course in &courses {
            let modules = self.repos.modules.find_by_course_ordered(course.id)?;
            cache.put_or_refresh(course.id, modules.into_iter().collect());
        }

        info!(courses = courses.len(), "Module sequences prefetched");
        Ok(courses.len())
    }

    fn load_course(&self, id: CourseId) -> CacheResult<Course> {
        self.repos
            .courses
            .find_by_id(id)?
            .ok_or_else(|| CacheError::not_found("Course", id))
    }

    fn load_module(&self, id: ModuleId) -> CacheResult<Module> {
        self.repos
            .modules
            .find_by_id(id)?
            .ok_or_else(|| CacheError::not_found("Module", id))
    }

    fn ensure_user(&self, id: UserId) -> CacheResult<()> {
        match self.repos.users.find_by_id(id)? {
            Some(_) => Ok(()),
            None => Err(CacheError::not_found("User", id)),
        }
    }

    fn load_enrollments(&self, course_id: CourseId) -> CacheResult<Vec<Enrollment>> {
        self.load_course(course_id)?;
        Ok(self.repos.enrollments.find_by_course(course_id)?)
    }

    /// Unknown courses fail here, so no entry is ever created for them.
    fn build_sequence(&self, course_id: CourseId) -> CacheResult<OrderedSequence<Module>> {
        self.load_course(course_id)?;
        let modules = self.repos.modules.find_by_course_ordered(course_id)?;
        Ok(modules.into_iter().collect())
    }

    /// Replaces the course's sequence with a fresh one from the repository.
    fn rebuild_sequence(
        &self,
        cache: &mut KeyedCache<CourseId, OrderedSequence<Module>>,
        course_id: CourseId,
    ) -> CacheResult<OrderedSequence<Module>> {
        let sequence = self.build_sequence(course_id)?;
        debug!(course_id = %course_id, modules = sequence.size(), "Module sequence rebuilt");
        cache.put_or_refresh(course_id, sequence.clone());
        Ok(sequence)
    }

    fn report(&self, event: CatalogEvent) {
        self.activity.catalog_changed(event);
    }
}

impl std::fmt::Debug for CourseCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseCatalog")
            .field("config", &self.config)
            .field("enrollment_entries", &self.enrollments.len())
            .field("sequence_entries", &self.sequences.len())
            .finish_non_exhaustive()
    }
}

impl CourseCatalogApi for CourseCatalog {
    fn get_course(&self, id: CourseId) -> CacheResult<Course> {
        self.load_course(id)
    }

    fn active_courses(&self) -> CacheResult<Vec<Course>> {
        Ok(self.repos.courses.find_active()?)
    }

    fn courses_by_instructor(&self, instructor_id: UserId) -> CacheResult<Vec<Course>> {
        Ok(self.repos.courses.find_by_instructor(instructor_id)?)
    }

    fn courses_by_student(&self, student_id: UserId) -> CacheResult<Vec<Course>> {
        let mut courses = Vec::new();
        for enrollment in self.repos.enrollments.find_by_student(student_id)? {
            match self.repos.courses.find_by_id(enrollment.course_id)? {
                Some(course) if course.active => courses.push(course),
                _ => {}
            }
        }
        Ok(courses)
    }

    fn create_course(&self, request: NewCourse) -> CacheResult<Course> {
        if request.title.trim().is_empty() {
            return Err(CacheError::InvalidRequest("course title is empty".into()));
        }
        self.ensure_user(request.instructor_id)?;

        let course = {
            let mut cache = self.sequences.write();
            let course = self.repos.courses.insert(request)?;
            cache.put_or_refresh(course.id, OrderedSequence::new());
            course
        };

        info!(course_id = %course.id, instructor_id = %course.instructor_id, "Course created");
        self.report(CatalogEvent::CourseCreated {
            course_id: course.id,
            title: course.title.clone(),
        });
        Ok(course)
    }

    fn update_course(&self, id: CourseId, update: CourseUpdate) -> CacheResult<Course> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CacheError::InvalidRequest("course title is empty".into()));
        }
        if let Some(instructor_id) = update.instructor_id {
            self.ensure_user(instructor_id)?;
        }

        let course = {
            let mut enrollments = self.enrollments.write();
            let mut sequences = self.sequences.write();

            let mut course = self.load_course(id)?;
            if let Some(title) = update.title {
                course.title = title;
            }
            if let Some(description) = update.description {
                course.description = description;
            }
            if let Some(instructor_id) = update.instructor_id {
                course.instructor_id = instructor_id;
            }
            let course = self.repos.courses.update(course)?;

            sequences.invalidate(&id);
            enrollments.invalidate(&id);
            course
        };

        info!(course_id = %id, instructor_id = %course.instructor_id, "Course updated");
        self.report(CatalogEvent::CourseUpdated {
            course_id: id,
            title: course.title.clone(),
        });
        Ok(course)
    }

    fn deactivate_course(&self, id: CourseId) -> CacheResult<Course> {
        let course = {
            let mut enrollments = self.enrollments.write();
            let mut sequences = self.sequences.write();

            let mut course = self.load_course(id)?;
            course.active = false;
            let course = self.repos.courses.update(course)?;

            sequences.invalidate(&id);
            enrollments.invalidate(&id);
            course
        };

        info!(course_id = %id, "Course deactivated, caches cleared");
        self.report(CatalogEvent::CourseDeactivated {
            course_id: id,
            title: course.title.clone(),
        });
        Ok(course)
    }

    fn get_enrollments_by_course(&self, course_id: CourseId) -> CacheResult<Vec<Enrollment>> {
        self.enrollments
            .get_or_load(&course_id, |id| self.load_enrollments(*id))
    }

    fn enroll_student(&self, course_id: CourseId, student_id: UserId) -> CacheResult<Enrollment> {
        let enrollment = {
            let mut cache = self.enrollments.write();

            let course = self.load_course(course_id)?;
            if !course.active {
                return Err(CacheError::InvalidRequest(format!(
                    "course {course_id} is not active"
                )));
            }
            self.ensure_user(student_id)?;

            if self.repos.enrollments.exists(course_id, student_id)? {
                return Err(CacheError::Conflict(format!(
                    "student {student_id} is already enrolled in course {course_id}"
                )));
            }

            let enrollment = self.repos.enrollments.insert(NewEnrollment {
                course_id,
                student_id,
                enrolled_at: self.time.now(),
            })?;

            // The enrollment is persisted at this point; a failed refresh
            // only costs the cached list.
            match self.repos.enrollments.find_by_course(course_id) {
                Ok(fresh) => cache.put_or_refresh(course_id, fresh),
                Err(e) => {
                    cache.invalidate(&course_id);
                    warn!(
                        course_id = %course_id,
                        error = %e,
                        "Enrollment list refresh failed, cached entry dropped"
                    );
                }
            }
            enrollment
        };

        info!(course_id = %course_id, student_id = %student_id, "Student enrolled");
        self.report(CatalogEvent::StudentEnrolled {
            course_id,
            student_id,
        });
        Ok(enrollment)
    }

    fn invalidate_enrollments(&self, course_id: CourseId) -> bool {
        self.enrollments.invalidate(&course_id)
    }

    fn enrollment_snapshot(&self) -> BTreeMap<CourseId, Vec<Enrollment>> {
        self.enrollments.snapshot_all()
    }

    fn get_module_sequence(&self, course_id: CourseId) -> CacheResult<OrderedSequence<Module>> {
        let cached = self.sequences.read().lookup(&course_id);
        match cached {
            Some(sequence) if !(sequence.is_empty() && self.config.rebuild_empty_sequences) => {
                Ok(sequence)
            }
            _ => {
                let mut cache = self.sequences.write();
                // Another caller may have rebuilt it meanwhile.
                if let Some(sequence) = cache.lookup(&course_id) {
                    if !sequence.is_empty() {
                        return Ok(sequence);
                    }
                }
                self.rebuild_sequence(&mut cache, course_id)
            }
        }
    }

    fn modules_by_course(&self, course_id: CourseId) -> CacheResult<Vec<Module>> {
        Ok(self.repos.modules.find_by_course_ordered(course_id)?)
    }

    fn get_module(&self, id: ModuleId) -> CacheResult<Module> {
        self.load_module(id)
    }

    fn add_module(&self, request: NewModule) -> CacheResult<Module> {
        if request.title.trim().is_empty() {
            return Err(CacheError::InvalidRequest("module title is empty".into()));
        }

        let module = {
            let mut cache = self.sequences.write();
            let course = self.load_course(request.course_id)?;
            let module = self.repos.modules.insert(request)?;

            match cache.entry_mut(&course.id) {
                Some(sequence) => sequence.add(module.clone()),
                None => {
                    let mut sequence = OrderedSequence::new();
                    sequence.add(module.clone());
                    cache.put_or_refresh(course.id, sequence);
                }
            }
            module
        };

        debug!(course_id = %module.course_id, module_id = %module.id, order = module.order, "Module appended to sequence");
        self.report(CatalogEvent::ModuleAdded {
            course_id: module.course_id,
            module_id: module.id,
            title: module.title.clone(),
        });
        Ok(module)
    }

    fn update_module(&self, id: ModuleId, update: ModuleUpdate) -> CacheResult<Module> {
        let module = {
            let mut cache = self.sequences.write();
            let mut module = self.load_module(id)?;

            if let Some(title) = update.title {
                module.title = title;
            }
            if let Some(content) = update.content {
                module.content = content;
            }
            if let Some(order) = update.order {
                module.order = order;
            }

            let module = self.repos.modules.update(module)?;
            self.rebuild_sequence(&mut cache, module.course_id)?;
            module
        };

        self.report(CatalogEvent::ModuleUpdated {
            course_id: module.course_id,
            module_id: module.id,
        });
        Ok(module)
    }

    fn delete_module(&self, id: ModuleId) -> CacheResult<()> {
        let module = {
            let mut cache = self.sequences.write();
            let module = self.load_module(id)?;

            self.repos.modules.delete(id)?;
            if cache.contains(&module.course_id) {
                self.rebuild_sequence(&mut cache, module.course_id)?;
            } else {
                debug!(course_id = %module.course_id, module_id = %id, "Deleted module of an uncached course");
            }
            module
        };

        self.report(CatalogEvent::ModuleDeleted {
            course_id: module.course_id,
            module_id: id,
        });
        Ok(())
    }

    fn module_sequence_snapshot(&self) -> BTreeMap<CourseId, OrderedSequence<Module>> {
        self.sequences.snapshot_all()
    }

    fn enrollment_cache_stats(&self) -> CacheStats {
        self.enrollments.stats()
    }

    fn module_cache_stats(&self) -> CacheStats {
        self.sequences.stats()
    }
}
