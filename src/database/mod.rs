// ABOUTME: SQLite connection pool, schema migrations, and the Database handle
// ABOUTME: User directory and workout aggregate store are implemented as inherent methods in submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! [`Database`] wraps an sqlx `SQLite` pool. Store operations live in
//! submodules as `impl Database` blocks:
//!
//! - `users`: user directory and bearer token records
//! - `workouts`: the workout aggregate (header plus ordered entries)
//! - `transactions`: the RAII guard every multi-statement write goes through

mod users;
mod workouts;

/// RAII transaction guard
pub mod transactions;

use std::fs;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};

pub use transactions::{SqliteTransactionGuard, TransactionGuard};

/// Database handle shared by every request
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the pool described by `config` and run migrations
    ///
    /// In-memory databases are private to a single connection, so they are
    /// opened with a pool of exactly one connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the
    /// connection fails, or a migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")).with_source(e))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(defaults::DATABASE_BUSY_TIMEOUT_SECS));

        let pool_options = match &config.url {
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| {
                        AppError::config(format!(
                            "Cannot create database directory {}: {e}",
                            parent.display()
                        ))
                        .with_source(e)
                    })?;
                }
                SqlitePoolOptions::new().max_connections(config.max_connections)
            }
        };

        let pool = pool_options.connect_with(options).await?;
        info!(database = %config.url, "Database connection pool established");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(&DatabaseConfig {
            url: DatabaseUrl::Memory,
            max_connections: 1,
        })
        .await
    }

    /// Get a reference to the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Begin a guarded deferred transaction for reads
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired
    pub async fn begin(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        Ok(TransactionGuard::new(self.pool.begin().await?))
    }

    /// Begin a guarded transaction that holds the write lock from its first statement
    ///
    /// A deferred transaction that reads before it writes cannot upgrade its
    /// lock while another writer holds one, and `SQLite` fails it with
    /// `SQLITE_BUSY` without waiting. `BEGIN IMMEDIATE` queues writers on the
    /// busy timeout instead, so concurrent writes serialize and the last
    /// commit wins.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired or the write lock
    /// is not granted within the busy timeout
    pub async fn begin_write(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        Ok(TransactionGuard::new(
            self.pool.begin_with("BEGIN IMMEDIATE").await?,
        ))
    }

    /// Cheap connectivity probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create every table if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if a DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_workouts().await?;
        debug!("Database migrations complete");
        Ok(())
    }
}
