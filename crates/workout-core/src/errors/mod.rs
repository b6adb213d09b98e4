// ABOUTME: Unified error handling with standard error codes and HTTP response mapping
// ABOUTME: Defines AppError, ErrorCode, and the JSON error envelope returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workout tracker returns [`AppResult`].
//! An [`AppError`] carries an [`ErrorCode`] which decides the HTTP status,
//! a message, and an optional source error for logging.
//!
//! Client-correctable errors (validation, duplicates, auth, not found) are
//! surfaced verbatim. Server-side errors are logged with their full context
//! and replaced with a generic message before leaving the process.

#[cfg(feature = "database-errors")]
mod database;

#[cfg(feature = "http-response")]
mod http;

#[cfg(feature = "database-errors")]
pub use database::unique_violation_message;

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to clients for every 5xx error
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// Request requires an authenticated principal
    AuthRequired = 1000,
    /// Credentials were presented but are malformed, unknown, or expired
    AuthInvalid = 1001,

    // Validation (3000-3999)
    /// Input failed validation
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// Referenced entity does not exist
    ResourceNotFound = 4000,
    /// Unique constraint violated
    ResourceAlreadyExists = 4001,

    // Configuration (6000-6999)
    /// Configuration could not be loaded or is invalid
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Storage transport or transaction failure
    DatabaseError = 9001,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::ResourceAlreadyExists => 400,
            Self::AuthRequired | Self::AuthInvalid => 401,
            Self::ResourceNotFound => 404,
            Self::ConfigError | Self::InternalError | Self::DatabaseError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }

    /// Whether errors with this code are caused by the server rather than the client
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.http_status() >= 500
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Message safe to show to a client
    ///
    /// Server errors never leak their internal message.
    #[must_use]
    pub fn client_message(&self) -> &str {
        if self.code.is_server_error() {
            INTERNAL_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-safe error message
    pub error: String,
    /// Machine-readable error code
    pub code: ErrorCode,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.client_message().to_owned(),
            code: error.code,
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Invalid, malformed, or expired credentials
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Unique constraint violation
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::AuthInvalid.http_status(), 401);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceAlreadyExists.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_server_errors_are_sanitized() {
        let error = AppError::database("connection to sqlite:/var/secret.db refused");
        assert_eq!(error.client_message(), INTERNAL_ERROR_MESSAGE);

        let response = ErrorResponse::from(&error);
        assert_eq!(response.error, INTERNAL_ERROR_MESSAGE);
        assert_eq!(response.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_client_errors_are_verbatim() {
        let error = AppError::invalid_input("title is required");
        assert_eq!(error.client_message(), "title is required");

        let json = serde_json::to_value(ErrorResponse::from(&error)).unwrap();
        assert_eq!(json["error"], "title is required");
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_not_found_message() {
        let error = AppError::not_found("Workout 42");
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.message, "Workout 42 not found");
    }
}
