// ABOUTME: Criterion benchmarks for the workout aggregate store
// ABOUTME: Measures transactional create, ordered read, and entry replacement on in-memory SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for workout aggregate writes and reads.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tokio::runtime::Runtime;
use workout_tracker::database::Database;
use workout_tracker::models::{NewWorkout, NewWorkoutEntry, WorkoutPatch};

/// Build a workout alternating rep-based and timed entries
fn generate_workout(entry_count: i64) -> NewWorkout {
    let entries = (1..=entry_count)
        .map(|order_index| {
            let timed = order_index % 2 == 0;
            NewWorkoutEntry {
                exercise_name: format!("Exercise {order_index}"),
                sets: 3,
                reps: (!timed).then_some(10),
                duration_seconds: timed.then_some(45),
                weight: (!timed).then_some(60.0),
                notes: None,
                order_index,
            }
        })
        .collect();

    NewWorkout {
        title: "Benchmark session".to_owned(),
        description: String::new(),
        duration_minutes: 60,
        calories_burned: 500,
        entries,
    }
}

fn bench_create_workout(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let db = rt.block_on(Database::in_memory()).unwrap();
    let mut group = c.benchmark_group("create_workout");

    for entry_count in [1_i64, 10, 50] {
        let workout = generate_workout(entry_count);
        group.throughput(Throughput::Elements(entry_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(entry_count),
            &workout,
            |b, workout| {
                b.iter(|| rt.block_on(async { db.create_workout(black_box(workout)).await }));
            },
        );
    }

    group.finish();
}

fn bench_get_workout(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let db = rt.block_on(Database::in_memory()).unwrap();
    let created = rt
        .block_on(db.create_workout(&generate_workout(20)))
        .unwrap();

    c.bench_function("get_workout_by_id/20_entries", |b| {
        b.iter(|| rt.block_on(async { db.get_workout_by_id(black_box(created.id)).await }));
    });
}

fn bench_replace_entries(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let db = rt.block_on(Database::in_memory()).unwrap();
    let created = rt
        .block_on(db.create_workout(&generate_workout(10)))
        .unwrap();
    let patch = WorkoutPatch {
        entries: Some(generate_workout(10).entries),
        ..WorkoutPatch::default()
    };

    c.bench_function("update_workout_by_id/replace_10_entries", |b| {
        b.iter(|| {
            rt.block_on(async {
                db.update_workout_by_id(black_box(created.id), black_box(&patch))
                    .await
            })
        });
    });
}

criterion_group!(
    benches,
    bench_create_workout,
    bench_get_workout,
    bench_replace_entries
);
criterion_main!(benches);
