//! Comment model for corkboard.

use serde::Serialize;

/// Comment entity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Comment body text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Owning user id.
    pub author_id: String,
    /// Parent post id.
    pub post_id: i64,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Comment body text.
    pub body: String,
    /// Owning user id.
    pub author_id: String,
    /// Parent post id.
    pub post_id: i64,
}

impl NewComment {
    /// Create a new comment record.
    pub fn new(body: impl Into<String>, author_id: impl Into<String>, post_id: i64) -> Self {
        Self {
            body: body.into(),
            author_id: author_id.into(),
            post_id,
        }
    }
}

/// Comment row joined with its author's display name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentDetail {
    /// Unique comment ID.
    pub id: i64,
    /// Comment body text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Owning user id.
    pub author_id: String,
    /// Author's display name.
    pub author_name: String,
    /// Parent post id.
    pub post_id: i64,
}
