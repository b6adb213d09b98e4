// ABOUTME: User identity models and the request principal
// ABOUTME: User, NewUser, and the Principal sum type separating registered from anonymous callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    pub id: i64,
    /// Unique username, at most 50 characters
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Argon2 PHC string; never leaves the server
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Optional biography
    pub bio: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Requested username
    pub username: String,
    /// Requested email
    pub email: String,
    /// Optional biography
    pub bio: Option<String>,
}

/// The acting identity of a request
///
/// Every request that passed identity resolution carries exactly one
/// principal. Anonymous callers have no identifier and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A caller that presented a valid bearer token
    Registered(User),
    /// A caller that presented no credentials
    Anonymous,
}

impl Principal {
    /// Check whether this principal is the anonymous caller
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The registered user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Registered(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    /// Consume the principal, yielding the registered user if any
    #[must_use]
    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Registered(user) => Some(user),
            Self::Anonymous => None,
        }
    }
}
