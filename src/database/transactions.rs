// ABOUTME: RAII transaction guard used by every multi-statement write
// ABOUTME: Rolls the transaction back on any exit path that does not reach commit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unit of work for aggregate writes
//!
//! ```text
//! let mut guard = TransactionGuard::new(pool.begin().await?);
//! sqlx::query("INSERT INTO workouts ...").execute(guard.executor()?).await?;
//! sqlx::query("INSERT INTO workout_entries ...").execute(guard.executor()?).await?;
//! guard.commit().await?;
//! ```
//!
//! Returning early with `?`, panicking, or dropping the future (client
//! disconnect, request timeout) drops the guard before `commit` and `SQLx`
//! rolls the transaction back when the inner `Transaction` is dropped.

use sqlx::{Database, Sqlite, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// RAII guard for database transactions ensuring automatic rollback on drop
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    committed: bool,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Wrap a transaction obtained from `pool.begin().await`
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let Some(tx) = self.transaction.take() else {
            return Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            ));
        };
        tx.commit().await.map_err(|e| {
            AppError::database(format!("Transaction commit failed: {e}")).with_source(e)
        })?;
        self.committed = true;
        debug!("TransactionGuard committed");
        Ok(())
    }

    /// Explicitly roll the transaction back and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed or the rollback fails
    pub async fn rollback(mut self) -> AppResult<()> {
        let Some(tx) = self.transaction.take() else {
            return Err(AppError::internal(
                "Transaction already consumed - cannot rollback",
            ));
        };
        tx.rollback().await.map_err(|e| {
            AppError::database(format!("Transaction rollback failed: {e}")).with_source(e)
        })?;
        debug!("TransactionGuard rolled back explicitly");
        Ok(())
    }

    /// Whether `commit` succeeded
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Connection to execute statements on
    ///
    /// # Errors
    ///
    /// Returns an error if the guard has already been committed or rolled back
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!("TransactionGuard dropped without commit - rolling back");
        }
    }
}

/// `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, Sqlite>;
