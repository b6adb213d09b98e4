// ABOUTME: Conversions from sqlx errors into the unified AppError type
// ABOUTME: Keeps raw driver errors as the source so they reach logs but never clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::Error as SqlxError;

use super::AppError;

impl From<SqlxError> for AppError {
    fn from(error: SqlxError) -> Self {
        match error {
            SqlxError::RowNotFound => Self::not_found("Record"),
            other => Self::database(format!("Database operation failed: {other}")).with_source(other),
        }
    }
}

/// Returns the constraint message when `error` is a unique constraint violation
#[must_use]
pub fn unique_violation_message(error: &SqlxError) -> Option<String> {
    match error {
        SqlxError::Database(db_error) if db_error.is_unique_violation() => {
            Some(db_error.message().to_owned())
        }
        _ => None,
    }
}
