// ABOUTME: Workout aggregate persistence with all-or-nothing writes
// ABOUTME: Header and ordered entries are written in one guarded transaction and validated inline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Aggregate Store
//!
//! Every write runs inside a [`SqliteTransactionGuard`] opened with
//! `BEGIN IMMEDIATE`, so concurrent writers queue and the last commit wins.
//! Entries are inserted in ascending `order_index` order and each one is
//! validated immediately before its insert, so the first invalid entry aborts
//! the write and the dropped guard rolls back the header and every entry
//! inserted before it.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::{debug, info, instrument};

use super::{Database, SqliteTransactionGuard};
use crate::errors::{unique_violation_message, AppError, AppResult};
use crate::models::{
    EntryMeasurement, NewWorkout, NewWorkoutEntry, Workout, WorkoutEntry, WorkoutPatch,
};

impl Database {
    /// Create workouts and workout entries tables
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
                calories_burned INTEGER NOT NULL CHECK (calories_burned >= 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_name TEXT NOT NULL,
                sets INTEGER NOT NULL CHECK (sets > 0),
                reps INTEGER CHECK (reps > 0),
                duration_seconds INTEGER CHECK (duration_seconds > 0),
                weight REAL CHECK (weight >= 0),
                notes TEXT,
                order_index INTEGER NOT NULL CHECK (order_index > 0),
                CHECK (
                    (reps IS NOT NULL AND duration_seconds IS NULL)
                    OR (reps IS NULL AND duration_seconds IS NOT NULL)
                ),
                UNIQUE (workout_id, order_index)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_entries_workout ON workout_entries(workout_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Atomically create a workout and all of its entries
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an invalid header, the first invalid entry
    /// in `order_index` order, or a duplicate `order_index`. Nothing is
    /// persisted when any error is returned.
    #[instrument(skip_all, fields(title = %new_workout.title, entries = new_workout.entries.len()))]
    pub async fn create_workout(&self, new_workout: &NewWorkout) -> AppResult<Workout> {
        new_workout.validate_header()?;

        let mut guard = self.begin_write().await?;
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO workouts (title, description, duration_minutes, calories_burned, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&new_workout.title)
        .bind(&new_workout.description)
        .bind(new_workout.duration_minutes)
        .bind(new_workout.calories_burned)
        .bind(now)
        .bind(now)
        .execute(guard.executor()?)
        .await?;

        let workout_id = result.last_insert_rowid();
        let entries = insert_entries(&mut guard, workout_id, &new_workout.entries).await?;
        guard.commit().await?;

        info!(workout_id, entries = entries.len(), "Workout created");

        Ok(Workout {
            id: workout_id,
            title: new_workout.title.clone(),
            description: new_workout.description.clone(),
            duration_minutes: new_workout.duration_minutes,
            calories_burned: new_workout.calories_burned,
            entries,
        })
    }

    /// Read a workout with its entries in ascending `order_index` order
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no such workout exists
    #[instrument(skip(self))]
    pub async fn get_workout_by_id(&self, id: i64) -> AppResult<Workout> {
        // Header and entries come from one snapshot so a concurrent entry
        // replacement is never observed half applied
        let mut guard = self.begin().await?;

        let mut workout = fetch_header(guard.executor()?, id)
            .await?
            .ok_or_else(|| workout_not_found(id))?;
        workout.entries = fetch_entries(guard.executor()?, id).await?;

        guard.commit().await?;
        Ok(workout)
    }

    /// Apply a partial update, replacing all entries when `patch.entries` is present
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no such workout exists, or
    /// `InvalidInput` under the same rules as [`Database::create_workout`].
    /// Nothing is persisted when any error is returned.
    #[instrument(skip(self, patch), fields(replace_entries = patch.entries.is_some()))]
    pub async fn update_workout_by_id(&self, id: i64, patch: &WorkoutPatch) -> AppResult<Workout> {
        let mut guard = self.begin_write().await?;

        let mut workout = fetch_header(guard.executor()?, id)
            .await?
            .ok_or_else(|| workout_not_found(id))?;
        patch.apply_header(&mut workout)?;

        sqlx::query(
            r"
            UPDATE workouts
            SET title = $1, description = $2, duration_minutes = $3, calories_burned = $4, updated_at = $5
            WHERE id = $6
            ",
        )
        .bind(&workout.title)
        .bind(&workout.description)
        .bind(workout.duration_minutes)
        .bind(workout.calories_burned)
        .bind(Utc::now())
        .bind(id)
        .execute(guard.executor()?)
        .await?;

        workout.entries = if let Some(entries) = &patch.entries {
            let removed = sqlx::query("DELETE FROM workout_entries WHERE workout_id = $1")
                .bind(id)
                .execute(guard.executor()?)
                .await?
                .rows_affected();
            debug!(removed, "Previous entries removed");
            insert_entries(&mut guard, id, entries).await?
        } else {
            fetch_entries(guard.executor()?, id).await?
        };

        guard.commit().await?;
        info!(workout_id = id, "Workout updated");
        Ok(workout)
    }

    /// Delete a workout; its entries are removed by cascade
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no row was deleted
    #[instrument(skip(self))]
    pub async fn delete_workout_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(workout_not_found(id));
        }

        info!(workout_id = id, "Workout deleted");
        Ok(())
    }
}

/// Validate and insert entries in ascending `order_index` order
async fn insert_entries(
    guard: &mut SqliteTransactionGuard<'_>,
    workout_id: i64,
    entries: &[NewWorkoutEntry],
) -> AppResult<Vec<WorkoutEntry>> {
    let mut ordered: Vec<&NewWorkoutEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.order_index);

    let mut stored = Vec::with_capacity(ordered.len());
    for entry in ordered {
        let measurement = entry.validate()?;

        let result = sqlx::query(
            r"
            INSERT INTO workout_entries
                (workout_id, exercise_name, sets, reps, duration_seconds, weight, notes, order_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(workout_id)
        .bind(&entry.exercise_name)
        .bind(entry.sets)
        .bind(measurement.reps())
        .bind(measurement.duration_seconds())
        .bind(measurement.weight())
        .bind(&entry.notes)
        .bind(entry.order_index)
        .execute(guard.executor()?)
        .await
        .map_err(|e| {
            if unique_violation_message(&e).is_some() {
                AppError::invalid_input(format!(
                    "duplicate order_index {} within workout",
                    entry.order_index
                ))
            } else {
                AppError::from(e)
            }
        })?;

        stored.push(WorkoutEntry {
            id: result.last_insert_rowid(),
            exercise_name: entry.exercise_name.clone(),
            sets: entry.sets,
            measurement,
            notes: entry.notes.clone(),
            order_index: entry.order_index,
        });
    }

    Ok(stored)
}

async fn fetch_header(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Workout>> {
    let row = sqlx::query(
        r"
        SELECT id, title, description, duration_minutes, calories_burned
        FROM workouts WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(row_to_header).transpose()
}

async fn fetch_entries(conn: &mut SqliteConnection, workout_id: i64) -> AppResult<Vec<WorkoutEntry>> {
    let rows = sqlx::query(
        r"
        SELECT id, exercise_name, sets, reps, duration_seconds, weight, notes, order_index
        FROM workout_entries
        WHERE workout_id = $1
        ORDER BY order_index ASC
        ",
    )
    .bind(workout_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(row_to_entry).collect()
}

fn row_to_header(row: &SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        duration_minutes: row.try_get("duration_minutes")?,
        calories_burned: row.try_get("calories_burned")?,
        entries: Vec::new(),
    })
}

fn row_to_entry(row: &SqliteRow) -> AppResult<WorkoutEntry> {
    let id: i64 = row.try_get("id")?;
    let reps: Option<i64> = row.try_get("reps")?;
    let duration_seconds: Option<i64> = row.try_get("duration_seconds")?;

    let measurement = match (reps, duration_seconds) {
        (Some(reps), None) => EntryMeasurement::Reps {
            reps,
            weight: row.try_get("weight")?,
        },
        (None, Some(duration_seconds)) => EntryMeasurement::Duration { duration_seconds },
        _ => {
            return Err(AppError::internal(format!(
                "Workout entry {id} has no single measurement mode"
            )));
        }
    };

    Ok(WorkoutEntry {
        id,
        exercise_name: row.try_get("exercise_name")?,
        sets: row.try_get("sets")?,
        measurement,
        notes: row.try_get("notes")?,
        order_index: row.try_get("order_index")?,
    })
}

fn workout_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Workout {id}"))
}
