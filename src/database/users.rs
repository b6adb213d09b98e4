// ABOUTME: User directory and bearer token persistence
// ABOUTME: Creates and fetches users, issues hashed tokens, and resolves live tokens back to users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, info, instrument};

use super::Database;
use crate::crypto::{generate_token, hash_token};
use crate::errors::{unique_violation_message, AppError, AppResult};
use crate::models::{NewUser, Token, TokenScope, User};

const USER_COLUMNS: &str = "id, username, email, password_hash, bio, created_at, updated_at";

impl Database {
    /// Create users and tokens tables
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                bio TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tokens (
                hash BLOB PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expiry INTEGER NOT NULL,
                scope TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tokens_user_scope ON tokens(user_id, scope)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user with an already-hashed password
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` naming the field when the username or
    /// email is taken, or a database error if the insert fails
    #[instrument(skip_all, fields(username = %new_user.username))]
    pub async fn create_user(&self, new_user: &NewUser, password_hash: &str) -> AppResult<User> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO users (username, email, password_hash, bio, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(password_hash)
        .bind(&new_user.bio)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match unique_violation_message(&e) {
            Some(message) => duplicate_user_error(&message),
            None => AppError::from(e),
        })?;

        let id = result.last_insert_rowid();
        info!(user_id = id, "User created");

        Ok(User {
            id,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: password_hash.to_owned(),
            bio: new_user.bio.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a user by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no such user exists
    pub async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(row_to_user)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))
    }

    /// Fetch a user by exact username
    ///
    /// # Errors
    ///
    /// Returns an error only if the query fails
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Resolve a presented bearer token to its owner
    ///
    /// Unknown, expired, and wrong-scope tokens all yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the lookup itself fails
    #[instrument(skip_all, fields(scope = %scope))]
    pub async fn get_user_by_token(
        &self,
        scope: TokenScope,
        raw_token: &str,
    ) -> AppResult<Option<User>> {
        let hash = hash_token(raw_token);
        let row = sqlx::query(
            r"
            SELECT u.id, u.username, u.email, u.password_hash, u.bio, u.created_at, u.updated_at
            FROM users u
            INNER JOIN tokens t ON t.user_id = u.id
            WHERE t.hash = $1 AND t.scope = $2 AND t.expiry > $3
            ",
        )
        .bind(hash)
        .bind(scope.as_str())
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await?;

        let user = row.as_ref().map(row_to_user).transpose()?;
        debug!(resolved = user.is_some(), "Token lookup finished");
        Ok(user)
    }

    /// Issue and persist a new token; the plaintext is only in the returned value
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including for an unknown user
    #[instrument(skip_all, fields(user_id = user_id, scope = %scope))]
    pub async fn create_token(
        &self,
        user_id: i64,
        ttl: Duration,
        scope: TokenScope,
    ) -> AppResult<Token> {
        let token = generate_token(user_id, ttl, scope);
        sqlx::query("INSERT INTO tokens (hash, user_id, expiry, scope) VALUES ($1, $2, $3, $4)")
            .bind(&token.hash)
            .bind(token.user_id)
            .bind(token.expiry.timestamp())
            .bind(token.scope.as_str())
            .execute(&self.pool)
            .await?;

        info!(user_id, expiry = %token.expiry, "Token issued");
        Ok(token)
    }

    /// Revoke every token a user holds in `scope`, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_tokens_for_user(&self, user_id: i64, scope: TokenScope) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_id = $1 AND scope = $2")
            .bind(user_id)
            .bind(scope.as_str())
            .execute(&self.pool)
            .await?;

        info!(user_id, scope = %scope, revoked = result.rows_affected(), "Tokens revoked");
        Ok(result.rows_affected())
    }
}

/// Convert a database row to a User struct
fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        bio: row.try_get("bio")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn duplicate_user_error(constraint_message: &str) -> AppError {
    // SQLite reports "UNIQUE constraint failed: users.<column>"
    if constraint_message.contains("users.email") {
        AppError::already_exists("a user with that email already exists")
    } else if constraint_message.contains("users.username") {
        AppError::already_exists("a user with that username already exists")
    } else {
        AppError::already_exists("user already exists")
    }
}
