//! # OCMS Core Benchmarks
//!
//! | Container | Operation | Expected |
//! |-----------|-----------|----------|
//! | Ordered sequence | `add` | O(1) |
//! | Ordered sequence | `get(i)` | O(i) |
//! | Priority queue | `enqueue` | O(n) |
//! | Priority queue | `dequeue` | O(1) |
//! | Keyed cache | hit | O(log n) |
//! | Activity log | range query | O(log n + k) |

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use oc_01_collections::{OrderedSequence, SortedPriorityQueue};
use oc_02_keyed_cache::{SharedCache, UserDirectory, UserDirectoryApi};
use oc_04_activity_log::{Activity, ActivityLog, CollisionPolicy};
use shared_types::{InMemoryUserRepository, NewUser, UserRole};

// ============================================================================
// OC-01: Collections
// ============================================================================

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("oc-01-ordered-sequence");

    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("add", size), &size, |b, &size| {
            b.iter(|| {
                let mut sequence = OrderedSequence::new();
                for i in 0..size {
                    sequence.add(i);
                }
                black_box(sequence.size())
            })
        });

        let sequence: OrderedSequence<usize> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("get_last", size), &sequence, |b, sequence| {
            b.iter(|| black_box(sequence.get(sequence.size() - 1).ok().copied()))
        });
    }

    group.finish();
}

fn bench_priority_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("oc-01-priority-queue");

    for size in [100usize, 1_000, 5_000] {
        let mut rng = rand::thread_rng();
        let keys: Vec<u32> = (0..size).map(|_| rng.gen_range(0..1_000_000)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("enqueue_then_drain", size),
            &keys,
            |b, keys| {
                b.iter(|| {
                    let mut queue = SortedPriorityQueue::natural();
                    for key in keys {
                        queue.enqueue(*key);
                    }
                    let mut last = 0;
                    while let Ok(key) = queue.dequeue() {
                        last = key;
                    }
                    black_box(last)
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// OC-02: Keyed Cache
// ============================================================================

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("oc-02-keyed-cache");

    let cache: SharedCache<u64, u64> = SharedCache::new("bench");
    for key in 0..10_000u64 {
        let _ = cache.get_or_load(&key, |k| Ok::<_, ()>(k * 2));
    }
    group.bench_function("shared_hit", |b| {
        let mut key = 0u64;
        b.iter(|| {
            key = (key + 7) % 10_000;
            black_box(cache.get_or_load(&key, |k| Ok::<_, ()>(*k)))
        })
    });

    let repo = Arc::new(InMemoryUserRepository::new());
    let directory = UserDirectory::new(repo);
    for i in 0..1_000 {
        let _ = directory.register_user(NewUser {
            username: format!("user{i}"),
            email: format!("user{i}@example.org"),
            first_name: "Bench".into(),
            last_name: "User".into(),
            role: UserRole::Student,
        });
    }
    group.bench_function("user_by_username_hit", |b| {
        b.iter(|| black_box(directory.get_user_by_username("user500").is_ok()))
    });
    group.bench_function("user_by_username_miss_refill", |b| {
        b.iter(|| {
            directory.invalidate("user42");
            black_box(directory.get_user_by_username("user42").is_ok())
        })
    });

    group.finish();
}

// ============================================================================
// OC-04: Activity Log
// ============================================================================

fn bench_activity_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("oc-04-activity-log");
    group.measurement_time(Duration::from_secs(5));

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut log = ActivityLog::new(CollisionPolicy::Retain);
    for minute in 0..100_000i64 {
        log.append(
            start + chrono::Duration::minutes(minute),
            Activity::custom("tick"),
        );
    }

    for window in [10i64, 1_000, 10_000] {
        let from = start + chrono::Duration::minutes(50_000);
        let to = from + chrono::Duration::minutes(window);
        group.throughput(Throughput::Elements(window as u64));
        group.bench_with_input(BenchmarkId::new("range", window), &(from, to), |b, (from, to)| {
            b.iter(|| black_box(log.range(*from, *to).count()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sequence,
    bench_priority_queue,
    bench_cache,
    bench_activity_range
);
criterion_main!(benches);
