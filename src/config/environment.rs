// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a strongly typed ServerConfig with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, limits};
use crate::errors::{AppError, AppResult};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
            Self::Testing => f.write_str("testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file path
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `DATABASE_URL` value
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:`, or a bare file path.
    ///
    /// # Errors
    ///
    /// Returns a config error for empty values and non-`SQLite` schemes
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL cannot be empty"));
        }
        if let Some(path) = s.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            return Ok(if path == ":memory:" {
                Self::Memory
            } else {
                Self::SQLite {
                    path: PathBuf::from(path),
                }
            });
        }
        if s.contains("://") {
            return Err(AppError::config(format!(
                "Unsupported database URL scheme: {s}"
            )));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to an sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        // Default constant always parses to a file path
        Self::parse_url(defaults::DATABASE_URL).unwrap_or(Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of issued authentication tokens in hours
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    /// Token lifetime as a chrono duration
    ///
    /// Clamped to `limits::TOKEN_TTL_MAX_HOURS` in both directions.
    #[must_use]
    pub fn token_ttl(&self) -> ChronoDuration {
        ChronoDuration::hours(
            self.token_ttl_hours
                .clamp(-limits::TOKEN_TTL_MAX_HOURS, limits::TOKEN_TTL_MAX_HOURS),
        )
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: defaults::AUTH_TOKEN_TTL_HOURS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: String,
    /// Deployment environment
    pub environment: Environment,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            log_level: "info".into(),
            environment: Environment::default(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns a config error if a variable is set to an unparsable value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns a config error if a variable is set to an unparsable value
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            http_port: parse_var(&lookup, "HTTP_PORT", defaults::HTTP_PORT)?,
            log_level: var_or("RUST_LOG", "info"),
            environment: Environment::from_str_or_default(&var_or("ENVIRONMENT", "development")),
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults::REQUEST_TIMEOUT_SECS,
            )?,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&var_or("DATABASE_URL", defaults::DATABASE_URL))?,
                max_connections: parse_var(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    defaults::DATABASE_MAX_CONNECTIONS,
                )?,
            },
            auth: AuthConfig {
                token_ttl_hours: parse_var(
                    &lookup,
                    "AUTH_TOKEN_TTL_HOURS",
                    defaults::AUTH_TOKEN_TTL_HOURS,
                )?,
            },
        })
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a config error for a zero connection pool, a zero timeout, or
    /// a token lifetime above `limits::TOKEN_TTL_MAX_HOURS`
    pub fn validate(&self) -> AppResult<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::config(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::config("REQUEST_TIMEOUT_SECS must be at least 1"));
        }
        if self.auth.token_ttl_hours > limits::TOKEN_TTL_MAX_HOURS {
            return Err(AppError::config(format!(
                "AUTH_TOKEN_TTL_HOURS must be at most {}",
                limits::TOKEN_TTL_MAX_HOURS
            )));
        }
        if self.auth.token_ttl_hours <= 0 {
            warn!(
                token_ttl_hours = self.auth.token_ttl_hours,
                "AUTH_TOKEN_TTL_HOURS is not positive; issued tokens will never authenticate"
            );
        }
        Ok(())
    }

    /// Whole-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// One-line configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} environment={} database={} max_connections={} token_ttl_hours={} request_timeout_secs={}",
            self.http_port,
            self.environment,
            self.database.url,
            self.database.max_connections,
            self.auth.token_ttl_hours,
            self.request_timeout_secs,
        )
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
    })
}
