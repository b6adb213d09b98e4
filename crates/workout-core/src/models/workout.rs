// ABOUTME: Workout aggregate models and their validation rules
// ABOUTME: Workout header, ordered entries, measurement modes, and create/patch payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Aggregate
//!
//! A [`Workout`] owns an ordered list of [`WorkoutEntry`] values. Each entry
//! is measured in exactly one [`EntryMeasurement`] mode, so a stored entry
//! can never carry both a repetition count and a duration.
//!
//! Incoming payloads ([`NewWorkout`], [`NewWorkoutEntry`], [`WorkoutPatch`])
//! keep the wire shape with two optional measurement fields. They are turned
//! into the domain types by the `validate` methods, which the store calls
//! inside its write transaction.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// How a single entry is measured
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryMeasurement {
    /// Repetitions, optionally under load
    Reps {
        /// Repetitions per set
        reps: i64,
        /// Load per repetition
        weight: Option<f64>,
    },
    /// Timed hold or interval
    Duration {
        /// Seconds per set
        duration_seconds: i64,
    },
}

impl EntryMeasurement {
    /// Repetition count for rep-based entries
    #[must_use]
    pub const fn reps(&self) -> Option<i64> {
        match self {
            Self::Reps { reps, .. } => Some(*reps),
            Self::Duration { .. } => None,
        }
    }

    /// Load for rep-based entries
    #[must_use]
    pub const fn weight(&self) -> Option<f64> {
        match self {
            Self::Reps { weight, .. } => *weight,
            Self::Duration { .. } => None,
        }
    }

    /// Duration for timed entries
    #[must_use]
    pub const fn duration_seconds(&self) -> Option<i64> {
        match self {
            Self::Duration { duration_seconds } => Some(*duration_seconds),
            Self::Reps { .. } => None,
        }
    }
}

/// A persisted exercise entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutEntry {
    /// Server-assigned identifier
    pub id: i64,
    /// Exercise performed
    pub exercise_name: String,
    /// Number of sets
    pub sets: i64,
    /// Measurement mode and values
    #[serde(flatten)]
    pub measurement: EntryMeasurement,
    /// Free-text notes
    pub notes: Option<String>,
    /// Position within the parent workout
    pub order_index: i64,
}

/// A persisted workout with its entries in order-index order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    /// Server-assigned identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Total duration in minutes
    pub duration_minutes: i64,
    /// Estimated calories burned
    pub calories_burned: i64,
    /// Entries sorted by ascending `order_index`
    pub entries: Vec<WorkoutEntry>,
}

/// Entry payload as received from clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutEntry {
    /// Exercise performed
    pub exercise_name: String,
    /// Number of sets
    pub sets: i64,
    /// Repetitions per set (rep mode)
    #[serde(default)]
    pub reps: Option<i64>,
    /// Seconds per set (duration mode)
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    /// Load per repetition (rep mode only)
    #[serde(default)]
    pub weight: Option<f64>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Position within the parent workout
    pub order_index: i64,
}

impl NewWorkoutEntry {
    /// Resolve the measurement mode
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when both or neither of `reps` and
    /// `duration_seconds` are present, or when a value is out of range.
    pub fn measurement(&self) -> AppResult<EntryMeasurement> {
        match (self.reps, self.duration_seconds) {
            (Some(_), Some(_)) => Err(self.invalid(
                "must specify either reps or duration_seconds, not both",
            )),
            (None, None) => Err(self.invalid("must specify either reps or duration_seconds")),
            (Some(reps), None) => {
                if reps <= 0 {
                    return Err(self.invalid("reps must be positive"));
                }
                if let Some(weight) = self.weight {
                    if !weight.is_finite() || weight < 0.0 {
                        return Err(self.invalid("weight must be non-negative"));
                    }
                }
                Ok(EntryMeasurement::Reps {
                    reps,
                    weight: self.weight,
                })
            }
            (None, Some(duration_seconds)) => {
                if duration_seconds <= 0 {
                    return Err(self.invalid("duration_seconds must be positive"));
                }
                if self.weight.is_some() {
                    return Err(self.invalid("weight is only valid for rep-based entries"));
                }
                Ok(EntryMeasurement::Duration { duration_seconds })
            }
        }
    }

    /// Validate every field and resolve the measurement mode
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the first offending field.
    pub fn validate(&self) -> AppResult<EntryMeasurement> {
        if self.exercise_name.trim().is_empty() {
            return Err(self.invalid("exercise_name is required"));
        }
        if self.sets <= 0 {
            return Err(self.invalid("sets must be positive"));
        }
        if self.order_index <= 0 {
            return Err(self.invalid("order_index must be positive"));
        }
        self.measurement()
    }

    fn invalid(&self, reason: &str) -> AppError {
        AppError::invalid_input(format!(
            "invalid entry at order_index {}: {reason}",
            self.order_index
        ))
    }
}

/// Workout payload for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Total duration in minutes
    pub duration_minutes: i64,
    /// Estimated calories burned
    pub calories_burned: i64,
    /// Entries in any order; stored by `order_index`
    #[serde(default)]
    pub entries: Vec<NewWorkoutEntry>,
}

impl NewWorkout {
    /// Validate the header fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty title, a non-positive duration,
    /// or negative calories.
    pub fn validate_header(&self) -> AppResult<()> {
        validate_header(&self.title, self.duration_minutes, self.calories_burned)
    }
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPatch {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New duration
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// New calories
    #[serde(default)]
    pub calories_burned: Option<i64>,
    /// Replacement entry list; replaces every stored entry when present
    #[serde(default)]
    pub entries: Option<Vec<NewWorkoutEntry>>,
}

impl WorkoutPatch {
    /// Apply header fields onto a stored workout
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the patched header is invalid.
    pub fn apply_header(&self, workout: &mut Workout) -> AppResult<()> {
        if let Some(title) = &self.title {
            workout.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            workout.description.clone_from(description);
        }
        if let Some(duration_minutes) = self.duration_minutes {
            workout.duration_minutes = duration_minutes;
        }
        if let Some(calories_burned) = self.calories_burned {
            workout.calories_burned = calories_burned;
        }
        validate_header(
            &workout.title,
            workout.duration_minutes,
            workout.calories_burned,
        )
    }
}

fn validate_header(title: &str, duration_minutes: i64, calories_burned: i64) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::invalid_input("title is required"));
    }
    if duration_minutes <= 0 {
        return Err(AppError::invalid_input("duration_minutes must be positive"));
    }
    if calories_burned < 0 {
        return Err(AppError::invalid_input(
            "calories_burned must be non-negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn entry(reps: Option<i64>, duration_seconds: Option<i64>) -> NewWorkoutEntry {
        NewWorkoutEntry {
            exercise_name: "Squats".into(),
            sets: 4,
            reps,
            duration_seconds,
            weight: None,
            notes: None,
            order_index: 2,
        }
    }

    #[test]
    fn test_both_measurements_rejected() {
        let err = entry(Some(12), Some(60)).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("order_index 2"));
        assert!(err.message.contains("not both"));
    }

    #[test]
    fn test_neither_measurement_rejected() {
        assert!(entry(None, None).validate().is_err());
    }

    #[test]
    fn test_rep_mode_with_weight() {
        let mut e = entry(Some(10), None);
        e.weight = Some(135.5);
        assert_eq!(
            e.validate().unwrap(),
            EntryMeasurement::Reps {
                reps: 10,
                weight: Some(135.5)
            }
        );
    }

    #[test]
    fn test_duration_mode_rejects_weight() {
        let mut e = entry(None, Some(60));
        assert_eq!(
            e.validate().unwrap(),
            EntryMeasurement::Duration {
                duration_seconds: 60
            }
        );
        e.weight = Some(20.0);
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_field_ranges() {
        let mut e = entry(Some(0), None);
        assert!(e.validate().is_err());

        e = entry(Some(5), None);
        e.weight = Some(-1.0);
        assert!(e.validate().is_err());

        e = entry(Some(5), None);
        e.sets = 0;
        assert!(e.validate().is_err());

        e = entry(Some(5), None);
        e.order_index = 0;
        assert!(e.validate().is_err());

        e = entry(Some(5), None);
        e.exercise_name = "   ".into();
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_entry_serializes_flat_measurement() {
        let stored = WorkoutEntry {
            id: 1,
            exercise_name: "Plank".into(),
            sets: 3,
            measurement: EntryMeasurement::Duration {
                duration_seconds: 60,
            },
            notes: Some("Keep focus".into()),
            order_index: 1,
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["duration_seconds"], 60);
        assert!(json.get("reps").is_none());
        assert!(json.get("measurement").is_none());
    }

    #[test]
    fn test_patch_keeps_unspecified_fields() {
        let mut workout = Workout {
            id: 1,
            title: "push day".into(),
            description: "upper body".into(),
            duration_minutes: 60,
            calories_burned: 200,
            entries: Vec::new(),
        };
        let patch = WorkoutPatch {
            title: Some("pull day".into()),
            ..WorkoutPatch::default()
        };
        patch.apply_header(&mut workout).unwrap();
        assert_eq!(workout.title, "pull day");
        assert_eq!(workout.description, "upper body");
        assert_eq!(workout.duration_minutes, 60);
        assert_eq!(workout.calories_burned, 200);
    }

    #[test]
    fn test_patch_rejects_invalid_header() {
        let mut workout = Workout {
            id: 1,
            title: "push day".into(),
            description: String::new(),
            duration_minutes: 60,
            calories_burned: 200,
            entries: Vec::new(),
        };
        let patch = WorkoutPatch {
            duration_minutes: Some(0),
            ..WorkoutPatch::default()
        };
        assert!(patch.apply_header(&mut workout).is_err());
    }

    #[test]
    fn test_new_workout_header_validation() {
        let workout = NewWorkout {
            title: String::new(),
            description: String::new(),
            duration_minutes: 30,
            calories_burned: 0,
            entries: Vec::new(),
        };
        assert!(workout.validate_header().is_err());
    }
}
