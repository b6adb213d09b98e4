// ABOUTME: Shared server resources handed to every route and middleware
// ABOUTME: Bundles the database handle and configuration behind Arc for cheap cloning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;

/// Everything a request handler needs
pub struct ServerResources {
    /// Database handle (the pool inside is already shared)
    pub database: Database,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        Self { database, config }
    }
}
