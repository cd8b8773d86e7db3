//! User repository for corkboard.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{BoardError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Fails with `Conflict` if the login id is already taken.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        sqlx::query("INSERT INTO users (id, username, password) VALUES (?, ?, ?)")
            .bind(&new_user.id)
            .bind(&new_user.username)
            .bind(&new_user.password)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") {
                    BoardError::Conflict(format!("user id '{}' already exists", new_user.id))
                } else {
                    BoardError::Database(e.to_string())
                }
            })?;

        self.get_by_id(&new_user.id)
            .await?
            .ok_or_else(|| BoardError::NotFound("user".to_string()))
    }

    /// Get a user by login id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Check if a user exists.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists.0)
    }

    /// Delete a user by login id.
    ///
    /// Owned posts and comments are removed by the schema's cascade rules.
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Count posts owned by a user.
    pub async fn post_count(&self, id: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE author_id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Count comments owned by a user.
    pub async fn comment_count(&self, id: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE author_id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}
