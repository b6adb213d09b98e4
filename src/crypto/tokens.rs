// ABOUTME: Bearer token generation from CSPRNG bytes and SHA-256 lookup key derivation
// ABOUTME: Plaintext is URL-safe base64; only the digest is ever persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::constants::limits::TOKEN_ENTROPY_BYTES;
use crate::models::{Token, TokenScope};

/// Generate a fresh token for `user_id` expiring `ttl` from now
///
/// A zero or negative `ttl` yields a token that is already expired. An expiry
/// past the representable range saturates at the range's end.
#[must_use]
pub fn generate_token(user_id: i64, ttl: Duration, scope: TokenScope) -> Token {
    let mut random_bytes = [0_u8; TOKEN_ENTROPY_BYTES];
    OsRng.fill_bytes(&mut random_bytes);

    let plaintext = URL_SAFE_NO_PAD.encode(random_bytes);
    let hash = hash_token(&plaintext);

    Token {
        plaintext,
        hash,
        user_id,
        expiry: expiry_after(ttl),
        scope,
    }
}

fn expiry_after(ttl: Duration) -> DateTime<Utc> {
    Utc::now().checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// SHA-256 digest of a token plaintext, used as the storage lookup key
#[must_use]
pub fn hash_token(plaintext: &str) -> Vec<u8> {
    Sha256::digest(plaintext.as_bytes()).to_vec()
}
