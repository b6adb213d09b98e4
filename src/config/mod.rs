// ABOUTME: Configuration module for environment-driven server settings
// ABOUTME: Re-exports ServerConfig and its typed sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! All settings come from environment variables (optionally loaded from a
//! `.env` file). There is no configuration file format.

/// Environment variable parsing into typed configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseConfig, DatabaseUrl, Environment, ServerConfig};
