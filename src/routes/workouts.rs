// ABOUTME: Workout aggregate route handlers
// ABOUTME: Create, read, update, and delete workouts; every route requires a registered user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout routes
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | POST | `/workouts` | 201 `{"workout": ...}` |
//! | GET | `/workouts/{id}` | 200 `{"workout": ...}` |
//! | PUT | `/workouts/{id}` | 200 `{"workout": ...}` |
//! | DELETE | `/workouts/{id}` | 204 |

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::{id_param, json_body};
use crate::errors::AppError;
use crate::middleware::{require_user, AuthenticatedUser};
use crate::models::{NewWorkout, Workout, WorkoutPatch};
use crate::resources::ServerResources;

/// Response envelope for a single workout
#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    /// The workout with its ordered entries
    pub workout: Workout,
}

/// Workout routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create workout routes, all gated on a registered user
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", post(Self::handle_create))
            .route(
                "/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route_layer(middleware::from_fn(require_user))
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        payload: Result<Json<NewWorkout>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let new_workout = json_body(payload)?;
        let workout = resources.database.create_workout(&new_workout).await?;

        info!(user_id = user.id, workout_id = workout.id, "Workout recorded");
        Ok((StatusCode::CREATED, Json(WorkoutResponse { workout })).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let id = id_param(id)?;
        let workout = resources.database.get_workout_by_id(id).await?;
        Ok(Json(WorkoutResponse { workout }).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        id: Result<Path<i64>, PathRejection>,
        payload: Result<Json<WorkoutPatch>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = id_param(id)?;
        let patch = json_body(payload)?;
        let workout = resources.database.update_workout_by_id(id, &patch).await?;

        info!(user_id = user.id, workout_id = id, "Workout edited");
        Ok(Json(WorkoutResponse { workout }).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(user): AuthenticatedUser,
        id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let id = id_param(id)?;
        resources.database.delete_workout_by_id(id).await?;

        info!(user_id = user.id, workout_id = id, "Workout removed");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
