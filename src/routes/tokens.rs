// ABOUTME: Token issuance route handlers
// ABOUTME: Exchanges a username and password for a fresh authentication bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::json_body;
use crate::constants::error_messages;
use crate::crypto::verify_password_blocking;
use crate::errors::AppError;
use crate::models::{Token, TokenScope};
use crate::resources::ServerResources;

/// Request body for `POST /tokens/authentication`
#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    /// Account username
    #[serde(default)]
    pub username: String,
    /// Account password
    #[serde(default)]
    pub password: String,
}

/// Response body carrying the freshly issued token
#[derive(Debug, Serialize)]
pub struct AuthTokenResponse {
    /// Plaintext token and its expiry
    pub auth_token: Token,
}

/// Token routes
pub struct TokenRoutes;

impl TokenRoutes {
    /// Create token routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/tokens/authentication",
                post(Self::handle_create_authentication_token),
            )
            .with_state(resources)
    }

    async fn handle_create_authentication_token(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateTokenRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        if request.username.is_empty() || request.password.is_empty() {
            return Err(AppError::invalid_input("username and password are required"));
        }

        let Some(user) = resources
            .database
            .get_user_by_username(&request.username)
            .await?
        else {
            warn!("Token requested for unknown username");
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        };

        if !verify_password_blocking(request.password, user.password_hash.clone()).await? {
            warn!(user_id = user.id, "Token requested with wrong password");
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        let token = resources
            .database
            .create_token(
                user.id,
                resources.config.auth.token_ttl(),
                TokenScope::Authentication,
            )
            .await?;

        info!(user_id = user.id, "Authentication token issued");
        Ok((StatusCode::CREATED, Json(AuthTokenResponse { auth_token: token })).into_response())
    }
}
