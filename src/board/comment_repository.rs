//! Comment repository for corkboard.

use sqlx::SqlitePool;

use super::comment::{Comment, CommentDetail, NewComment};
use crate::{BoardError, Result};

const DETAIL_SELECT: &str = "SELECT c.id, c.body, c.created_at, c.updated_at, c.author_id,
            u.username AS author_name, c.post_id
     FROM comments c JOIN users u ON u.id = c.author_id";

/// Repository for comment CRUD operations.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let result = sqlx::query("INSERT INTO comments (body, author_id, post_id) VALUES (?, ?, ?)")
            .bind(&new_comment.body)
            .bind(&new_comment.author_id)
            .bind(new_comment.post_id)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let result = sqlx::query_as::<_, Comment>(
            "SELECT id, body, created_at, updated_at, author_id, post_id
             FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a comment with its author's display name.
    pub async fn get_detail(&self, id: i64) -> Result<Option<CommentDetail>> {
        let result =
            sqlx::query_as::<_, CommentDetail>(&format!("{DETAIL_SELECT} WHERE c.id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(result)
    }

    /// List comments on a post, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<CommentDetail>> {
        let comments = sqlx::query_as::<_, CommentDetail>(&format!(
            "{DETAIL_SELECT} WHERE c.post_id = ? ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// List comments by a user, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<CommentDetail>> {
        let comments = sqlx::query_as::<_, CommentDetail>(&format!(
            "{DETAIL_SELECT} WHERE c.author_id = ? ORDER BY c.created_at DESC, c.id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Count comments on a post.
    pub async fn count_by_post(&self, post_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Update a comment's body and refresh its update timestamp.
    ///
    /// Returns the updated comment, or None if not found.
    pub async fn update(&self, id: i64, body: &str) -> Result<Option<Comment>> {
        let result =
            sqlx::query("UPDATE comments SET body = ?, updated_at = datetime('now') WHERE id = ?")
                .bind(body)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a comment by ID.
    ///
    /// Returns true if a comment was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
