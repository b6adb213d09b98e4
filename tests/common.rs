// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, user, token, and router helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `workout_tracker`

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use chrono::Duration;
use workout_tracker::{
    config::{DatabaseUrl, ServerConfig},
    crypto::hash_password,
    database::Database,
    models::{NewUser, NewWorkout, NewWorkoutEntry, Token, TokenScope, User},
    resources::ServerResources,
    routes,
};

static INIT_LOGGER: Once = Once::new();

/// Password every helper-created user is registered with
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::in_memory().await?)
}

/// Configuration pointing at an in-memory database
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::Memory;
    config.database.max_connections = 1;
    config
}

/// Shared resources around an existing database
pub fn create_test_resources(database: Database) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(database, Arc::new(test_config())))
}

/// Full application router around an existing database
pub fn create_test_router(database: Database) -> Router {
    routes::router(create_test_resources(database))
}

/// Register a user with [`TEST_PASSWORD`]
pub async fn create_test_user(database: &Database, username: &str) -> Result<User> {
    let new_user = NewUser {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        bio: None,
    };
    let password_hash = hash_password(TEST_PASSWORD)?;
    Ok(database.create_user(&new_user, &password_hash).await?)
}

/// Issue a day-long authentication token for `user`
pub async fn create_test_token(database: &Database, user: &User) -> Result<Token> {
    Ok(database
        .create_token(user.id, Duration::hours(24), TokenScope::Authentication)
        .await?)
}

/// Register a user and return a bearer token plaintext for it
pub async fn create_authenticated_user(database: &Database, username: &str) -> Result<(User, String)> {
    let user = create_test_user(database, username).await?;
    let token = create_test_token(database, &user).await?;
    Ok((user, token.plaintext))
}

/// Rep-based entry
pub fn reps_entry(exercise_name: &str, order_index: i64, reps: i64, weight: Option<f64>) -> NewWorkoutEntry {
    NewWorkoutEntry {
        exercise_name: exercise_name.to_owned(),
        sets: 3,
        reps: Some(reps),
        duration_seconds: None,
        weight,
        notes: None,
        order_index,
    }
}

/// Timed entry
pub fn timed_entry(exercise_name: &str, order_index: i64, duration_seconds: i64) -> NewWorkoutEntry {
    NewWorkoutEntry {
        exercise_name: exercise_name.to_owned(),
        sets: 3,
        reps: None,
        duration_seconds: Some(duration_seconds),
        weight: None,
        notes: None,
        order_index,
    }
}

/// Workout header with the given entries
pub fn new_workout(title: &str, entries: Vec<NewWorkoutEntry>) -> NewWorkout {
    NewWorkout {
        title: title.to_owned(),
        description: format!("{title} session"),
        duration_minutes: 45,
        calories_burned: 350,
        entries,
    }
}
