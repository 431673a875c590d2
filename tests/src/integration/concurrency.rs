//! # Concurrency
//!
//! Many callers hitting one container at once. Services are synchronous, so
//! each caller runs on the blocking pool of a multi-threaded runtime.

use std::sync::Arc;

use oc_02_keyed_cache::{CourseCatalogApi, UserDirectoryApi};
use oc_03_submission_queue::{SubmissionError, SubmissionQueueApi};
use oc_04_activity_log::{Activity, ActivityLogApi, CollisionPolicy};
use ocms_runtime::RuntimeConfig;
use shared_types::{NewAssignment, NewSubmission, NewUser, UserRepository, UserRole};

use super::fixtures::{utc, Harness};

const CALLERS: usize = 32;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_load_once() {
    let h = Harness::default();
    // Written behind the cache so every caller starts on a miss.
    let stored = h
        .store
        .users
        .insert(NewUser {
            username: "shared".into(),
            email: "shared@example.org".into(),
            first_name: "Shared".into(),
            last_name: "User".into(),
            role: UserRole::Student,
        })
        .unwrap();

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let core = Arc::clone(&h.core);
            tokio::task::spawn_blocking(move || core.users.get_user_by_username("shared"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), stored);
    }

    let stats = h.core.users.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.fills, 1);
    assert_eq!(stats.hits, (CALLERS - 1) as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_submissions_accept_one() {
    let h = Harness::default();
    let instructor = h.user("lamport", UserRole::Instructor);
    let student = h.user("paxos", UserRole::Student);
    let course = h.course("Distributed Systems", &instructor);
    let assignment = h
        .core
        .submissions
        .create_assignment(NewAssignment {
            course_id: course.id,
            title: "consensus".into(),
            description: String::new(),
            due_date: utc(2024, 6, 1),
            max_score: 100.0,
        })
        .unwrap();

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let core = Arc::clone(&h.core);
            tokio::task::spawn_blocking(move || {
                core.submissions.submit_assignment(NewSubmission {
                    assignment_id: assignment.id,
                    user_id: student.id,
                    content: format!("attempt {i}"),
                })
            })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert!(matches!(err, SubmissionError::AlreadySubmitted { .. })),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(h.core.submissions.pending_count(), 1);
    assert_eq!(h.store.submissions.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_enrollments_all_visible() {
    let h = Harness::default();
    let instructor = h.user("hoare", UserRole::Instructor);
    let course = h.course("CSP", &instructor);
    let students: Vec<_> = (0..CALLERS)
        .map(|i| h.user(&format!("student{i}"), UserRole::Student))
        .collect();

    // Populate the entry so enrollments refresh a cached list.
    assert!(h.core.catalog.get_enrollments_by_course(course.id).unwrap().is_empty());

    let handles: Vec<_> = students
        .iter()
        .map(|student| {
            let core = Arc::clone(&h.core);
            let (course_id, student_id) = (course.id, student.id);
            tokio::task::spawn_blocking(move || core.catalog.enroll_student(course_id, student_id))
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let enrollments = h.core.catalog.get_enrollments_by_course(course.id).unwrap();
    assert_eq!(enrollments.len(), CALLERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_with_retain() {
    let mut config = RuntimeConfig::default();
    config.activity.collision = CollisionPolicy::Retain;
    let h = Harness::new(config);

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let core = Arc::clone(&h.core);
            tokio::task::spawn_blocking(move || {
                core.activity.record(Activity::custom(format!("event {i}")))
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // The manual clock never moves, so every append collides.
    assert_eq!(h.core.activity.len(), CALLERS);
    assert_eq!(h.core.admin_summary().activity_entries, CALLERS);
}
