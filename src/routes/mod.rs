// ABOUTME: Route module organization for the workout tracker HTTP API
// ABOUTME: Assembles domain routers and the middleware stack into a single axum Router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains route definitions and thin handlers that
//! decode the request, call into [`Database`](crate::database::Database),
//! and encode the response envelope.

/// Health check routes
pub mod health;
/// Token issuance routes
pub mod tokens;
/// User registration routes
pub mod users;
/// Workout aggregate routes
pub mod workouts;

pub use health::HealthRoutes;
pub use tokens::TokenRoutes;
pub use users::UserRoutes;
pub use workouts::WorkoutRoutes;

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::Path,
    middleware, Json, Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::debug;

use crate::constants::error_messages;
use crate::errors::{AppError, AppResult};
use crate::middleware::{authenticate, request_id_middleware};
use crate::resources::ServerResources;

/// Build the complete application router
///
/// Health checks sit outside identity resolution so they answer regardless
/// of the `Authorization` header.
pub fn router(resources: Arc<ServerResources>) -> Router {
    let timeout = resources.config.request_timeout();

    Router::new()
        .merge(UserRoutes::routes(Arc::clone(&resources)))
        .merge(TokenRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&resources),
            authenticate,
        ))
        .merge(HealthRoutes::routes(resources))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

/// Unwrap a JSON body, mapping every decoding failure to a 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::invalid_input(error_messages::INVALID_REQUEST_BODY)
    })
}

/// Unwrap a numeric `{id}` path segment, mapping failures to a 400
pub(crate) fn id_param(id: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    match id {
        Ok(Path(id)) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_input("invalid id parameter")),
    }
}
