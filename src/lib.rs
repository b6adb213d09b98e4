// ABOUTME: Main library entry point for the workout tracker API
// ABOUTME: Bearer token identity resolution in front of a transactional workout store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Tracker
//!
//! An HTTP API for recording workouts. Users register, exchange their
//! credentials for a bearer token, and then create, read, edit, and delete
//! workouts made of ordered exercise entries.
//!
//! ## Architecture
//!
//! - **Middleware**: resolves the `Authorization` header into a
//!   [`Principal`](models::Principal) on every request and gates protected
//!   routes on a registered user
//! - **Database**: user directory, hashed token records, and the workout
//!   aggregate store with all-or-nothing writes
//! - **Routes**: thin axum handlers that decode payloads and call the store
//! - **Config**: environment-driven [`ServerConfig`](config::ServerConfig)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workout_tracker::config::ServerConfig;
//! use workout_tracker::database::Database;
//! use workout_tracker::resources::ServerResources;
//! use workout_tracker::routes;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let database = Database::new(&config.database).await?;
//!     let app = routes::router(Arc::new(ServerResources::new(database, config)));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants organized by domain
pub mod constants;

/// Password hashing and bearer token generation
pub mod crypto;

/// `SQLite` persistence for users, tokens, and workouts
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Identity resolution and request id middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared state handed to handlers
pub mod resources;

/// HTTP routes
pub mod routes;
