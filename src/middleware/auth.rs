// ABOUTME: Bearer token identity resolution middleware and the login gate for protected routes
// ABOUTME: Attaches a Principal to every request and exposes typed extractors for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Identity Resolution
//!
//! [`authenticate`] runs on every request and ends in one of four states:
//!
//! 1. No `Authorization` header: [`Principal::Anonymous`] is attached.
//! 2. Header is not `Bearer <token>`: 401 without touching storage.
//! 3. Token unknown, expired, or of another scope: 401.
//! 4. Token resolves: [`Principal::Registered`] is attached.
//!
//! [`require_user`] is layered onto protected routes and rejects the
//! anonymous principal before the handler runs.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, VARY},
        request::Parts,
        Extensions, HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, field, instrument, Span};

use crate::constants::error_messages;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Principal, TokenScope, User};
use crate::resources::ServerResources;

/// Resolve the principal for a request and attach it to the request extensions
///
/// Every response that passes through carries `Vary: Authorization`.
pub async fn authenticate(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Response {
    let resolved = resolve_principal(&resources.database, req.headers()).await;
    let mut response = match resolved {
        Ok(principal) => {
            if let Some(user) = principal.user() {
                Span::current().record("user_id", user.id);
            }
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    };

    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));
    response
}

/// Determine the acting principal from request headers
///
/// # Errors
///
/// Returns `AuthInvalid` for a malformed header or a token that does not
/// resolve, and a database error if the token lookup fails
#[instrument(skip_all, fields(user_id = field::Empty))]
pub async fn resolve_principal(database: &Database, headers: &HeaderMap) -> AppResult<Principal> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        debug!("No Authorization header, proceeding as anonymous");
        return Ok(Principal::Anonymous);
    };

    let token = parse_bearer(value)?;

    match database
        .get_user_by_token(TokenScope::Authentication, token)
        .await?
    {
        Some(user) => {
            Span::current().record("user_id", user.id);
            Ok(Principal::Registered(user))
        }
        None => Err(AppError::auth_invalid(
            error_messages::INVALID_OR_EXPIRED_TOKEN,
        )),
    }
}

/// Split `Bearer <token>` into its token part
///
/// The header must consist of exactly two space-separated parts with the
/// scheme `Bearer`.
///
/// # Errors
///
/// Returns `AuthInvalid` when the header has any other shape
pub fn parse_bearer(value: &HeaderValue) -> AppResult<&str> {
    let header = value
        .to_str()
        .map_err(|_| AppError::auth_invalid(error_messages::INVALID_AUTH_HEADER))?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AppError::auth_invalid(error_messages::INVALID_AUTH_HEADER)),
    }
}

/// Reject the anonymous principal on protected routes
///
/// # Panics
///
/// Panics if the request never passed through [`authenticate`]
pub async fn require_user(req: Request, next: Next) -> Response {
    if principal_from_extensions(req.extensions()).is_anonymous() {
        return AppError::auth_required(error_messages::LOGIN_REQUIRED).into_response();
    }
    next.run(req).await
}

#[allow(clippy::panic)]
fn principal_from_extensions(extensions: &Extensions) -> &Principal {
    extensions.get::<Principal>().unwrap_or_else(|| {
        panic!("request principal missing: route is not wrapped by the authenticate middleware")
    })
}

/// Extractor for the principal of the current request, anonymous or not
///
/// # Panics
///
/// Extraction panics if the request never passed through [`authenticate`]
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(principal_from_extensions(&parts.extensions).clone()))
    }
}

/// Extractor for the registered user of the current request
///
/// Rejects the anonymous principal with 401.
///
/// # Panics
///
/// Extraction panics if the request never passed through [`authenticate`]
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal_from_extensions(&parts.extensions)
            .clone()
            .into_user()
            .map(Self)
            .ok_or_else(|| AppError::auth_required(error_messages::LOGIN_REQUIRED))
    }
}
