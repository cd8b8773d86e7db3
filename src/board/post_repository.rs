//! Post repository for corkboard.
//!
//! CRUD, pagination, search, and ranking queries over the posts table.
//! List-shaped queries join the author's display name and the comment count
//! so callers never traverse an object graph.

use sqlx::{QueryBuilder, SqlitePool};

use super::post::{NewPost, Post, PostDetail, PostListing, PostUpdate};
use crate::{BoardError, Result};

const LISTING_SELECT: &str = "SELECT p.id, p.title, p.created_at, p.updated_at, p.view_count, p.author_id,
            u.username AS author_name,
            (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
     FROM posts p JOIN users u ON u.id = p.author_id";

/// Escape LIKE wildcards so a keyword matches literally.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post with a zero view count.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result = sqlx::query("INSERT INTO posts (title, body, author_id) VALUES (?, ?, ?)")
            .bind(&new_post.title)
            .bind(&new_post.body)
            .bind(&new_post.author_id)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let result = sqlx::query_as::<_, Post>(
            "SELECT id, title, body, created_at, updated_at, view_count, author_id
             FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a post with its author name and comment count.
    pub async fn get_detail(&self, id: i64) -> Result<Option<PostDetail>> {
        let result = sqlx::query_as::<_, PostDetail>(
            "SELECT p.id, p.title, p.body, p.created_at, p.updated_at, p.view_count, p.author_id,
                    u.username AS author_name,
                    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
             FROM posts p JOIN users u ON u.id = p.author_id
             WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Increment a post's view counter by one.
    ///
    /// Returns false if the post doesn't exist. The increment happens in
    /// SQL, so the counter never goes backwards even under racing readers.
    pub async fn increment_views(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List posts, newest first.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<PostListing>> {
        let posts = sqlx::query_as::<_, PostListing>(&format!(
            "{LISTING_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// List posts by a user, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<PostListing>> {
        let posts = sqlx::query_as::<_, PostListing>(&format!(
            "{LISTING_SELECT} WHERE p.author_id = ? ORDER BY p.created_at DESC, p.id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Update a post by ID.
    ///
    /// Only fields set in the update are modified; `updated_at` is always
    /// refreshed. Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE posts SET updated_at = datetime('now')");

        if let Some(ref title) = update.title {
            query.push(", title = ");
            query.push_bind(title);
        }
        if let Some(ref body) = update.body {
            query.push(", body = ");
            query.push_bind(body);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID.
    ///
    /// Its comments are removed by the schema's cascade rules.
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Search posts whose title or body contains the keyword, newest first.
    ///
    /// The match is a case-insensitive substring match; LIKE wildcards in
    /// the keyword are treated as literals.
    pub async fn search(&self, keyword: &str, limit: i64) -> Result<Vec<PostListing>> {
        let pattern = format!("%{}%", escape_like(keyword));

        let posts = sqlx::query_as::<_, PostListing>(&format!(
            "{LISTING_SELECT}
             WHERE p.title LIKE ? ESCAPE '\\' OR p.body LIKE ? ESCAPE '\\'
             ORDER BY p.created_at DESC, p.id DESC LIMIT ?"
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// List posts ordered by comment count descending, newest first among ties.
    pub async fn popular(&self, limit: i64) -> Result<Vec<PostListing>> {
        let posts = sqlx::query_as::<_, PostListing>(&format!(
            "{LISTING_SELECT} ORDER BY comment_count DESC, p.created_at DESC, p.id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }
}
