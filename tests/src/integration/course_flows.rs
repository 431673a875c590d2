//! # Course Flows
//!
//! End-to-end paths through the core container:
//!
//! 1. **Catalog**: course creation, enrollment and module sequence rebuilds
//! 2. **Submissions**: due-date ordering, grading and statistics
//! 3. **Activity**: range queries and reports over recorded events

use chrono::Duration;

use oc_01_collections::{CollectionError, OrderedSequence};
use oc_02_keyed_cache::{CacheError, CourseCatalogApi, UserDirectoryApi};
use oc_03_submission_queue::{SubmissionError, SubmissionQueueApi};
use oc_04_activity_log::{Activity, ActivityKind, ActivityLogApi, CollisionPolicy};
use ocms_runtime::RuntimeConfig;
use shared_types::{
    AssignmentUpdate, CourseId, CourseUpdate, Grade, ModuleRepository, ModuleUpdate,
    NewAssignment, NewSubmission, TimeSource, UserRole,
};

use super::fixtures::{utc, Harness};

fn titles(sequence: &OrderedSequence<shared_types::Module>) -> Vec<String> {
    sequence.iter().map(|m| m.title.clone()).collect()
}

// =============================================================================
// CATALOG
// =============================================================================

#[test]
fn test_delete_middle_module_rebuilds_sequence() {
    let h = Harness::default();
    let instructor = h.user("turing", UserRole::Instructor);
    let course = h.course("Computability", &instructor);

    h.module(&course, "m1", 1);
    let m2 = h.module(&course, "m2", 2);
    h.module(&course, "m3", 3);

    assert_eq!(titles(&h.core.catalog.get_module_sequence(course.id).unwrap()), ["m1", "m2", "m3"]);

    h.core.catalog.delete_module(m2.id).unwrap();

    let sequence = h.core.catalog.get_module_sequence(course.id).unwrap();
    assert_eq!(titles(&sequence), ["m1", "m3"]);
    assert_eq!(sequence.size(), 2);
}

#[test]
fn test_reorder_module_rebuilds_sequence() {
    let h = Harness::default();
    let instructor = h.user("hopper", UserRole::Instructor);
    let course = h.course("Compilers", &instructor);

    let first = h.module(&course, "lexing", 1);
    h.module(&course, "parsing", 2);

    h.core
        .catalog
        .update_module(
            first.id,
            ModuleUpdate {
                order: Some(3),
                ..Default::default()
            },
        )
        .unwrap();

    let sequence = h.core.catalog.get_module_sequence(course.id).unwrap();
    assert_eq!(titles(&sequence), ["parsing", "lexing"]);
}

#[test]
fn test_module_written_behind_the_cache_is_picked_up_after_invalidation() {
    let h = Harness::default();
    let instructor = h.user("knuth", UserRole::Instructor);
    let course = h.course("Algorithms", &instructor);
    h.module(&course, "sorting", 1);

    // Direct repository writes bypass the cache.
    h.store
        .modules
        .insert(shared_types::NewModule {
            course_id: course.id,
            title: "searching".into(),
            content: String::new(),
            order: 2,
        })
        .unwrap();
    assert_eq!(h.core.catalog.get_module_sequence(course.id).unwrap().size(), 1);

    // Any module mutation rebuilds from source.
    let sorting = h.core.catalog.modules_by_course(course.id).unwrap()[0].id;
    h.core
        .catalog
        .update_module(sorting, ModuleUpdate::default())
        .unwrap();
    assert_eq!(
        titles(&h.core.catalog.get_module_sequence(course.id).unwrap()),
        ["sorting", "searching"]
    );
}

#[test]
fn test_unknown_course_sequence_is_not_cached() {
    let h = Harness::default();

    let err = h.core.catalog.get_module_sequence(CourseId(404)).unwrap_err();
    assert!(matches!(err, CacheError::NotFound { .. }));
    assert!(h.core.catalog.module_sequence_snapshot().is_empty());
}

#[test]
fn test_course_update_and_student_view() {
    let h = Harness::default();
    let instructor = h.user("wirth", UserRole::Instructor);
    let student = h.user("niklaus", UserRole::Student);
    let pascal = h.course("Pascal", &instructor);
    let oberon = h.course("Oberon", &instructor);
    h.module(&pascal, "records", 1);

    h.core.catalog.enroll_student(pascal.id, student.id).unwrap();
    h.core.catalog.enroll_student(oberon.id, student.id).unwrap();
    h.core.catalog.deactivate_course(oberon.id).unwrap();

    let updated = h
        .core
        .catalog
        .update_course(
            pascal.id,
            CourseUpdate {
                title: Some("Pascal and Modula".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Pascal and Modula");

    let courses = h.core.catalog.courses_by_student(student.id).unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Pascal and Modula");
    assert_eq!(h.core.catalog.get_module_sequence(pascal.id).unwrap().size(), 1);
    assert_eq!(h.core.users.all_users().unwrap().len(), 2);
}

#[test]
fn test_enrollment_flow() {
    let h = Harness::default();
    let instructor = h.user("liskov", UserRole::Instructor);
    let student = h.user("ada", UserRole::Student);
    let course = h.course("Abstraction", &instructor);

    assert!(h.core.catalog.get_enrollments_by_course(course.id).unwrap().is_empty());

    let enrollment = h.core.catalog.enroll_student(course.id, student.id).unwrap();
    assert_eq!(enrollment.enrolled_at, h.clock.now());

    let cached = h.core.catalog.enrollment_snapshot();
    assert_eq!(cached.get(&course.id).map(Vec::len), Some(1));

    let err = h.core.catalog.enroll_student(course.id, student.id).unwrap_err();
    assert!(matches!(err, CacheError::Conflict(_)));

    h.core.catalog.deactivate_course(course.id).unwrap();
    let late = h.user("bob", UserRole::Student);
    let err = h.core.catalog.enroll_student(course.id, late.id).unwrap_err();
    assert!(matches!(err, CacheError::InvalidRequest(_)));
}

#[test]
fn test_user_cache_invalidate_then_repopulate() {
    let h = Harness::default();
    let user = h.user("grace", UserRole::Student);

    assert!(h.core.users.invalidate("grace"));
    assert!(!h.core.users.invalidate("grace"));
    assert_eq!(h.core.users.get_user_by_username("grace").unwrap(), user);
    assert_eq!(h.core.admin_summary().user_cache.entries, 1);
}

// =============================================================================
// SUBMISSIONS
// =============================================================================

#[test]
fn test_submissions_dequeue_by_due_date() {
    let h = Harness::default();
    let instructor = h.user("dijkstra", UserRole::Instructor);
    let student = h.user("edsger", UserRole::Student);
    let course = h.course("Structured Programming", &instructor);

    let due_dates = [utc(2024, 3, 1), utc(2024, 1, 15), utc(2024, 2, 10)];
    for (i, due_date) in due_dates.into_iter().enumerate() {
        let assignment = h
            .core
            .submissions
            .create_assignment(NewAssignment {
                course_id: course.id,
                title: format!("hw{i}"),
                description: String::new(),
                due_date,
                max_score: 100.0,
            })
            .unwrap();
        h.core
            .submissions
            .submit_assignment(NewSubmission {
                assignment_id: assignment.id,
                user_id: student.id,
                content: format!("answer {i}"),
            })
            .unwrap();
    }
    assert_eq!(h.core.admin_summary().pending_submissions, 3);

    let order: Vec<_> = std::iter::from_fn(|| h.core.submissions.next_submission_to_process())
        .map(|s| s.due_date)
        .collect();
    assert_eq!(order, vec![utc(2024, 1, 15), utc(2024, 2, 10), utc(2024, 3, 1)]);
    assert!(h.core.submissions.next_submission_to_process().is_none());
}

#[test]
fn test_submit_grade_and_report() {
    let mut config = RuntimeConfig::default();
    config.activity.collision = CollisionPolicy::Retain;
    let h = Harness::new(config);
    let instructor = h.user("minsky", UserRole::Instructor);
    let alice = h.user("alice", UserRole::Student);
    let bob = h.user("bob", UserRole::Student);
    let course = h.course("AI", &instructor);

    let assignment = h
        .core
        .submissions
        .create_assignment(NewAssignment {
            course_id: course.id,
            title: "perceptrons".into(),
            description: String::new(),
            due_date: utc(2024, 2, 1),
            max_score: 10.0,
        })
        .unwrap();

    let mut submitted = Vec::new();
    for student in [&alice, &bob] {
        let submission = h
            .core
            .submissions
            .submit_assignment(NewSubmission {
                assignment_id: assignment.id,
                user_id: student.id,
                content: "done".into(),
            })
            .unwrap();
        h.clock.advance(Duration::minutes(5));
        submitted.push(submission);
    }

    h.core
        .submissions
        .grade_submission(submitted[0].id, Grade { score: 8.0, feedback: Some("good".into()) })
        .unwrap();
    let err = h
        .core
        .submissions
        .grade_submission(submitted[1].id, Grade { score: 11.0, feedback: None })
        .unwrap_err();
    assert!(matches!(err, SubmissionError::ScoreOutOfRange { .. }));

    let stats = h.core.submissions.assignment_statistics(assignment.id).unwrap();
    assert_eq!(stats.total_submissions, 2);
    assert_eq!(stats.graded_submissions, 1);
    assert_eq!(stats.ungraded_submissions, 1);
    assert!((stats.average_score - 8.0).abs() < f64::EPSILON);

    let pending = h.core.submissions.pending_submissions(assignment.id).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_id, bob.id);

    let report = h
        .core
        .activity
        .activity_report(utc(2024, 1, 1), utc(2024, 1, 2))
        .unwrap();
    let count = |kind: ActivityKind| report.activities.iter().filter(|e| e.payload.kind == kind).count();
    assert_eq!(count(ActivityKind::CourseChange), 2);
    assert_eq!(count(ActivityKind::Submission), 2);
    assert_eq!(count(ActivityKind::Grading), 1);
    assert_eq!(report.total_activities, 5);
    assert_eq!(report.activities_by_date.values().sum::<usize>(), 5);
}

#[test]
fn test_assignment_lifecycle_through_container() {
    let h = Harness::default();
    let instructor = h.user("lamport", UserRole::Instructor);
    let student = h.user("leslie", UserRole::Student);
    let course = h.course("Distributed Systems", &instructor);

    let mut created = Vec::new();
    for (title, due_date) in [("clocks", utc(2024, 1, 5)), ("paxos", utc(2024, 2, 5))] {
        created.push(
            h.core
                .submissions
                .create_assignment(NewAssignment {
                    course_id: course.id,
                    title: title.into(),
                    description: String::new(),
                    due_date,
                    max_score: 100.0,
                })
                .unwrap(),
        );
    }

    h.clock.set(utc(2024, 1, 10));
    let overdue = h.core.submissions.overdue_assignments().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].title, "clocks");

    let extended = h
        .core
        .submissions
        .update_assignment(
            created[0].id,
            AssignmentUpdate {
                due_date: Some(utc(2024, 1, 20)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(extended.due_date, utc(2024, 1, 20));
    assert!(h.core.submissions.overdue_assignments().unwrap().is_empty());

    let january = h
        .core
        .submissions
        .assignments_by_date_range(utc(2024, 1, 1), utc(2024, 1, 31))
        .unwrap();
    assert_eq!(january.len(), 1);

    h.core.submissions.delete_assignment(created[1].id).unwrap();
    assert_eq!(h.core.submissions.all_assignments().unwrap().len(), 2);
    let err = h
        .core
        .submissions
        .submit_assignment(NewSubmission {
            assignment_id: created[1].id,
            user_id: student.id,
            content: "consensus".into(),
        })
        .unwrap_err();
    assert_eq!(err, SubmissionError::AssignmentInactive(created[1].id));
}

#[test]
fn test_late_submission_policy() {
    let strict = Harness::default();
    let instructor = strict.user("codd", UserRole::Instructor);
    let student = strict.user("chen", UserRole::Student);
    let course = strict.course("Databases", &instructor);
    let assignment = strict
        .core
        .submissions
        .create_assignment(NewAssignment {
            course_id: course.id,
            title: "normal forms".into(),
            description: String::new(),
            due_date: utc(2024, 1, 10),
            max_score: 100.0,
        })
        .unwrap();

    strict.clock.set(utc(2024, 1, 11));
    let err = strict
        .core
        .submissions
        .submit_assignment(NewSubmission {
            assignment_id: assignment.id,
            user_id: student.id,
            content: "late".into(),
        })
        .unwrap_err();
    assert!(matches!(err, SubmissionError::DeadlinePassed { .. }));

    let mut config = RuntimeConfig::default();
    config.submissions.accept_late = true;
    let lenient = Harness::new(config);
    let instructor = lenient.user("codd", UserRole::Instructor);
    let student = lenient.user("chen", UserRole::Student);
    let course = lenient.course("Databases", &instructor);
    let assignment = lenient
        .core
        .submissions
        .create_assignment(NewAssignment {
            course_id: course.id,
            title: "normal forms".into(),
            description: String::new(),
            due_date: utc(2024, 1, 10),
            max_score: 100.0,
        })
        .unwrap();

    lenient.clock.set(utc(2024, 1, 11));
    let accepted = lenient
        .core
        .submissions
        .submit_assignment(NewSubmission {
            assignment_id: assignment.id,
            user_id: student.id,
            content: "late".into(),
        })
        .unwrap();
    assert_eq!(accepted.submitted_on, utc(2024, 1, 11));
}

// =============================================================================
// ACTIVITY
// =============================================================================

#[test]
fn test_activity_range_is_inclusive() {
    let h = Harness::default();
    let t = |hour| utc(2024, 4, 1) + Duration::hours(hour);

    for (hour, label) in [(1, "t1"), (2, "t2"), (3, "t3"), (4, "t4")] {
        h.core.activity.record_at(t(hour), Activity::custom(label)).unwrap();
    }

    let hits: Vec<_> = h
        .core
        .activity
        .range_query(t(2), t(3))
        .into_iter()
        .map(|e| e.payload.message)
        .collect();
    assert_eq!(hits, ["t2", "t3"]);
    assert!(h.core.activity.range_query(t(3), t(2)).is_empty());
}

#[test]
fn test_activity_collision_policy_from_config() {
    let mut config = RuntimeConfig::default();
    config.activity.collision = CollisionPolicy::Retain;
    let h = Harness::new(config);

    h.core.activity.log_activity("first").unwrap();
    h.core.activity.log_activity("second").unwrap();
    assert_eq!(h.core.activity.len(), 2);

    let overwrite = Harness::default();
    overwrite.core.activity.log_activity("first").unwrap();
    overwrite.core.activity.log_activity("second").unwrap();
    assert_eq!(overwrite.core.activity.len(), 1);
    assert_eq!(overwrite.core.activity.snapshot_all()[0].payload.message, "second");
}

#[test]
fn test_course_activity_is_recorded_automatically() {
    let mut config = RuntimeConfig::default();
    config.activity.collision = CollisionPolicy::Retain;
    let h = Harness::new(config);
    let instructor = h.user("kay", UserRole::Instructor);
    let student = h.user("alan", UserRole::Student);
    let course = h.course("Smalltalk", &instructor);

    h.clock.advance(Duration::minutes(1));
    h.core.catalog.enroll_student(course.id, student.id).unwrap();

    let kinds: Vec<_> = h
        .core
        .activity
        .snapshot_all()
        .into_iter()
        .map(|e| e.payload.kind)
        .collect();
    assert_eq!(kinds, [ActivityKind::CourseChange, ActivityKind::Enrollment]);
}

#[test]
fn test_report_generation_is_logged() {
    let h = Harness::default();
    let student = h.user("ada", UserRole::Student);

    h.core
        .activity
        .record(Activity::student_report_generated(&student.username))
        .unwrap();

    let entries = h.core.activity.snapshot_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].payload.kind, ActivityKind::ReportGenerated);
    assert!(entries[0].payload.message.contains("ada"));
}

// =============================================================================
// COLLECTIONS
// =============================================================================

#[test]
fn test_remove_last_on_singleton_then_get_fails() {
    let mut sequence: OrderedSequence<u32> = [7].into_iter().collect();
    assert_eq!(sequence.remove_last(), Ok(7));
    assert!(sequence.is_empty());
    assert_eq!(
        sequence.get(0),
        Err(CollectionError::IndexOutOfRange { index: 0, size: 0 })
    );
}
