//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed, valid_user_id};
use crate::board::{clamp_page, DEFAULT_RANKING_LIMIT};

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login id.
    #[validate(
        length(min = 3, max = 20, message = "Must be 3-20 characters"),
        custom(function = "valid_user_id")
    )]
    pub id: String,
    /// Display name.
    #[validate(
        length(min = 2, max = 50, message = "Must be 2-50 characters"),
        custom(function = "no_control_chars")
    )]
    pub username: String,
    /// Password (plain; only its hash is stored).
    #[validate(length(min = 6, max = 128, message = "Must be 6-128 characters"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login id.
    pub id: String,
    /// Password.
    pub password: String,
}

/// Create-post request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(
        length(min = 1, max = 200, message = "Must be 1-200 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub title: String,
    /// Post body.
    #[validate(
        length(min = 1, max = 50000, message = "Must be 1-50000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub body: String,
}

/// Update-post request. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(length(min = 1, max = 200, message = "Must be 1-200 characters"))]
    pub title: Option<String>,
    /// New body.
    #[validate(length(min = 1, max = 50000, message = "Must be 1-50000 characters"))]
    pub body: Option<String>,
}

/// Create-comment request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Parent post id.
    pub post_id: i64,
    /// Comment body.
    #[validate(
        length(min = 1, max = 1000, message = "Must be 1-1000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub body: String,
}

/// Update-comment request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    /// New body.
    #[validate(
        length(min = 1, max = 1000, message = "Must be 1-1000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub body: String,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationQuery {
    /// Page and limit clamped to their valid ranges.
    pub fn clamped(&self) -> (u32, u32) {
        clamp_page(self.page, self.limit)
    }
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Keyword to match against titles and bodies.
    pub q: String,
}

/// Ranking query parameters for the recent/popular listings.
#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    /// Number of entries to return.
    pub limit: Option<u32>,
}

impl RankingQuery {
    /// The requested limit, or the default ranking size.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_RANKING_LIMIT)
    }
}
