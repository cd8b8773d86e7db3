//! Post model for corkboard.

use serde::Serialize;

/// Post entity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Number of detail views. Never decreases.
    pub view_count: i64,
    /// Owning user id.
    pub author_id: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Owning user id.
    pub author_id: String,
}

impl NewPost {
    /// Create a new post record.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_id: author_id.into(),
        }
    }
}

/// Partial update for a post.
///
/// Only fields that are set will be modified; `updated_at` is always
/// refreshed when the update is applied.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New title, if changing.
    pub title: Option<String>,
    /// New body, if changing.
    pub body: Option<String>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Check if no fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

/// Post detail row: the post plus its author's display name and comment count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostDetail {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Number of detail views.
    pub view_count: i64,
    /// Owning user id.
    pub author_id: String,
    /// Author's display name.
    pub author_name: String,
    /// Number of comments on this post.
    pub comment_count: i64,
}

/// Post list row: everything a listing needs, without the body.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostListing {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Number of detail views.
    pub view_count: i64,
    /// Owning user id.
    pub author_id: String,
    /// Author's display name.
    pub author_name: String,
    /// Number of comments on this post.
    pub comment_count: i64,
}
