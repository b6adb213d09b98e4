// ABOUTME: Application constants grouped by domain
// ABOUTME: Token scopes, validation limits, defaults, and client-facing error messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Bearer token scopes
pub mod scopes {
    /// Scope for tokens that authenticate API requests
    pub const AUTHENTICATION: &str = "authentication";
}

/// Validation limits for user-supplied data
pub mod limits {
    /// Maximum username length in characters
    pub const USERNAME_MAX_LENGTH: usize = 50;

    /// Number of random bytes in a freshly issued bearer token
    pub const TOKEN_ENTROPY_BYTES: usize = 32;

    /// Longest accepted authentication token lifetime (100 years)
    pub const TOKEN_TTL_MAX_HOURS: i64 = 24 * 365 * 100;

    /// Email shape accepted at registration
    pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;

    /// Default `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./data/workouts.db";

    /// Default maximum pooled connections
    pub const DATABASE_MAX_CONNECTIONS: u32 = 10;

    /// Default authentication token lifetime in hours
    pub const AUTH_TOKEN_TTL_HOURS: i64 = 24;

    /// How long a writer waits for the `SQLite` write lock
    pub const DATABASE_BUSY_TIMEOUT_SECS: u64 = 5;

    /// Default whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Service name reported in logs
    pub const SERVICE_NAME: &str = "workout-tracker";
}

/// Client-facing error messages
pub mod error_messages {
    /// Authorization header is not `Bearer <token>`
    pub const INVALID_AUTH_HEADER: &str = "invalid authorization header";

    /// Token unknown, expired, or issued for another scope
    pub const INVALID_OR_EXPIRED_TOKEN: &str = "invalid or expired token";

    /// Protected route reached by the anonymous principal
    pub const LOGIN_REQUIRED: &str = "you must be logged in to access this route";

    /// Username/password pair rejected
    pub const INVALID_CREDENTIALS: &str = "invalid credentials";

    /// Request body could not be decoded
    pub const INVALID_REQUEST_BODY: &str = "invalid request sent";
}
