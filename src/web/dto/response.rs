//! Response DTOs for the Web API.

use serde::Serialize;

use crate::board::{Page, PostListing};
use crate::file::FileKind;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Simple confirmation response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// Login id.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Current user response (for /api/auth/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Login id.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Number of posts owned by this user.
    pub post_count: i64,
    /// Number of comments owned by this user.
    pub comment_count: i64,
}

/// Paginated post list response.
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    /// Posts in this page, newest first.
    pub posts: Vec<PostListing>,
    /// Total number of posts.
    pub total: i64,
    /// Current page number (1-based).
    pub page: u32,
    /// Page size used.
    pub limit: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

impl From<Page<PostListing>> for PostListResponse {
    fn from(page: Page<PostListing>) -> Self {
        Self {
            posts: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Stored-file description returned by the upload endpoints.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public path the file is served from.
    pub url: String,
    /// Original filename as uploaded.
    pub filename: String,
    /// File size in bytes.
    pub size: u64,
    /// Coarse file classification.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// MIME type.
    pub mime_type: String,
}

/// Outcome of one file in a multi-upload request.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadOutcome {
    /// The file was stored.
    Stored(UploadResponse),
    /// The file was rejected.
    Failed {
        /// What went wrong.
        error: String,
    },
}

/// Multi-upload response.
#[derive(Debug, Serialize)]
pub struct UploadBatchResponse {
    /// Per-file outcomes, in request order.
    pub files: Vec<UploadOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_list_response_from_page() {
        let page = Page::new(Vec::<PostListing>::new(), 25, 2, 10);
        let response = PostListResponse::from(page);

        assert_eq!(response.total, 25);
        assert_eq!(response.page, 2);
        assert_eq!(response.limit, 10);
        assert_eq!(response.total_pages, 3);
    }

    #[test]
    fn test_upload_response_serializes_kind_as_type() {
        let response = UploadResponse {
            url: "/uploads/abc.png".to_string(),
            filename: "photo.png".to_string(),
            size: 42,
            kind: FileKind::Image,
            mime_type: "image/png".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["url"], "/uploads/abc.png");
    }

    #[test]
    fn test_upload_outcome_untagged() {
        let ok = UploadOutcome::Stored(UploadResponse {
            url: "/uploads/a.bin".to_string(),
            filename: "a".to_string(),
            size: 1,
            kind: FileKind::File,
            mime_type: "application/octet-stream".to_string(),
        });
        let json = serde_json::to_value(&ok).unwrap();
        assert!(json.get("url").is_some());

        let failed = UploadOutcome::Failed {
            error: "File too large".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], "File too large");
    }
}
