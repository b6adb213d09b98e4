// ABOUTME: Bearer token model and token scopes
// ABOUTME: The plaintext is only ever held in memory for the response that issues it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::scopes;
use crate::errors::AppError;

/// What a token may be used for
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// Authenticates API requests
    Authentication,
}

impl TokenScope {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => scopes::AUTHENTICATION,
        }
    }
}

impl Display for TokenScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            scopes::AUTHENTICATION => Ok(Self::Authentication),
            _ => Err(AppError::invalid_input(format!("Invalid token scope: {s}"))),
        }
    }
}

/// A freshly issued bearer token
///
/// Only `hash` is persisted. `plaintext` is returned to the caller once.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    /// Opaque token value presented as `Authorization: Bearer <token>`
    #[serde(rename = "token")]
    pub plaintext: String,
    /// SHA-256 digest of the plaintext; the lookup key in storage
    #[serde(skip)]
    pub hash: Vec<u8>,
    /// Owner of the token
    #[serde(skip)]
    pub user_id: i64,
    /// Absolute expiry
    pub expiry: DateTime<Utc>,
    /// Scope the token is valid for
    pub scope: TokenScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_round_trips_through_storage_string() {
        let scope: TokenScope = TokenScope::Authentication.as_str().parse().unwrap();
        assert_eq!(scope, TokenScope::Authentication);
        assert!("refresh".parse::<TokenScope>().is_err());
    }

    #[test]
    fn test_token_serializes_only_public_fields() {
        let token = Token {
            plaintext: "abc".into(),
            hash: vec![1, 2, 3],
            user_id: 9,
            expiry: Utc::now(),
            scope: TokenScope::Authentication,
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["token"], "abc");
        assert_eq!(json["scope"], "authentication");
        assert!(json.get("hash").is_none());
        assert!(json.get("user_id").is_none());
    }
}
