// ABOUTME: Core data models re-exported from workout-core
// ABOUTME: Re-exports User, Principal, Token, and the workout aggregate types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `User` and `Principal`: who is acting on a request
//! - `Token` and `TokenScope`: issued bearer credentials
//! - `Workout`, `WorkoutEntry`, `EntryMeasurement`: the workout aggregate
//! - `NewWorkout`, `NewWorkoutEntry`, `WorkoutPatch`: incoming payloads

pub use workout_core::models::*;
