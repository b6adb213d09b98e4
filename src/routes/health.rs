// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness endpoint that always answers 200 and reports database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let database = match resources.database.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, "Health check could not reach the database");
                "unavailable"
            }
        };

        Json(json!({
            "status": "healthy",
            "database": database,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }
}
