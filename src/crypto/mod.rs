// ABOUTME: Cryptography module for credential hashing and bearer token material
// ABOUTME: Centralizes all cryptographic operations for the workout tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cryptographic utilities
//!
//! Nothing in this module performs I/O. Argon2 is CPU-heavy, so async callers
//! go through the `*_blocking` helpers which run on the blocking pool.

/// Argon2id password hashing and verification
pub mod password;

/// Random bearer token generation and SHA-256 lookup keys
pub mod tokens;

pub use password::{hash_password, hash_password_blocking, verify_password, verify_password_blocking};
pub use tokens::{generate_token, hash_token};
