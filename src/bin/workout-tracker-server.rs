// ABOUTME: Server binary for the workout tracker HTTP API
// ABOUTME: Loads configuration, opens the database, and serves the router until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Tracker Server Binary
//!
//! Starts the HTTP API with bearer token authentication and `SQLite` storage.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use workout_tracker::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    routes,
};

#[derive(Parser)]
#[command(name = "workout-tracker-server")]
#[command(about = "Workout Tracker API - record workouts behind bearer token authentication")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    logging::init_from_env()?;

    info!("Starting Workout Tracker API");
    info!("{}", config.summary());

    let database = Database::new(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    info!("Database initialized successfully");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    let app = routes::router(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to install Ctrl-C handler: {e}");
        return;
    }
    info!("Shutdown signal received");
}
