// ABOUTME: User registration route handlers
// ABOUTME: Validates registration payloads, hashes passwords off the async runtime, and creates users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! User registration routes
//!
//! Registration is open to the anonymous principal. The password is hashed
//! with Argon2 on the blocking pool before the row is inserted.

use std::sync::{Arc, OnceLock};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::json_body;
use crate::constants::limits::{EMAIL_PATTERN, USERNAME_MAX_LENGTH};
use crate::crypto::hash_password_blocking;
use crate::errors::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::resources::ServerResources;

static EMAIL_REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Request body for `POST /users`
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    /// Requested username
    #[serde(default)]
    pub username: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Plaintext password
    #[serde(default)]
    pub password: String,
    /// Optional biography
    #[serde(default)]
    pub bio: Option<String>,
}

impl RegisterUserRequest {
    /// Check field presence and shape
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::invalid_input("username is required"));
        }
        if self.username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::invalid_input(format!(
                "username cannot be greater than {USERNAME_MAX_LENGTH} characters"
            )));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::invalid_input("email is required"));
        }
        if !email_regex()?.is_match(&self.email) {
            return Err(AppError::invalid_input("invalid email format"));
        }
        if self.password.is_empty() {
            return Err(AppError::invalid_input("password is required"));
        }
        Ok(())
    }
}

fn email_regex() -> AppResult<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| AppError::internal(format!("Email pattern failed to compile: {e}")))
}

/// Response body for a created user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The created user, without its password hash
    pub user: User,
}

/// User routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users", post(Self::handle_register))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<RegisterUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        request.validate()?;

        let password_hash = hash_password_blocking(request.password).await?;
        let new_user = NewUser {
            username: request.username,
            email: request.email,
            bio: request.bio,
        };
        let user = resources
            .database
            .create_user(&new_user, &password_hash)
            .await?;

        info!(user_id = user.id, "User registered");
        Ok((StatusCode::CREATED, Json(UserResponse { user })).into_response())
    }
}
