// ABOUTME: Domain models for users, bearer tokens, and workouts
// ABOUTME: Re-exports the types shared between the store, middleware, and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod token;
mod user;
mod workout;

pub use token::{Token, TokenScope};
pub use user::{NewUser, Principal, User};
pub use workout::{
    EntryMeasurement, NewWorkout, NewWorkoutEntry, Workout, WorkoutEntry, WorkoutPatch,
};
