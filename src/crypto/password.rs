// ABOUTME: Argon2id password hashing with random salts and constant-time verification
// ABOUTME: Async wrappers move the hashing work onto the tokio blocking pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::task;
use tracing::warn;

use crate::errors::{AppError, AppResult};

/// Hash a plaintext password into an Argon2id PHC string
///
/// # Errors
///
/// Returns an internal error if the Argon2 primitive fails. Input content
/// never causes an error.
pub fn hash_password(plaintext: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Argon2 password hashing failed: {e}")))
}

/// Check a plaintext password against a stored PHC string
///
/// An unparsable digest counts as a mismatch.
#[must_use]
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let parsed_hash = match PasswordHash::new(digest) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be parsed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed_hash)
        .is_ok()
}

/// [`hash_password`] on the blocking pool
///
/// # Errors
///
/// Returns an internal error if hashing fails or the blocking task panics
pub async fn hash_password_blocking(plaintext: String) -> AppResult<String> {
    task::spawn_blocking(move || hash_password(&plaintext))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// [`verify_password`] on the blocking pool
///
/// # Errors
///
/// Returns an internal error if the blocking task panics
pub async fn verify_password_blocking(plaintext: String, digest: String) -> AppResult<bool> {
    task::spawn_blocking(move || verify_password(&plaintext, &digest))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}
