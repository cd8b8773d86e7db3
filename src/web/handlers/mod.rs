//! Request handlers for the Web API.

mod auth;
mod comment;
mod post;
mod upload;

pub use auth::{login, logout, me, signup};
pub use comment::{
    create_comment, delete_comment, get_comment, list_comments_by_post, list_comments_by_user,
    update_comment,
};
pub use post::{
    create_post, delete_post, get_post, list_posts, list_posts_by_user, popular_posts,
    recent_posts, search_posts, update_post,
};
pub use upload::{upload_file, upload_files};

use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::file::FileStorage;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the pool inside is cheaply cloneable).
    pub db: Database,
    /// Injected session store.
    pub sessions: Arc<dyn SessionStore>,
    /// Upload storage.
    pub storage: FileStorage,
    /// Session time-to-live.
    pub session_ttl: Duration,
    /// Maximum size of a single uploaded file, in bytes.
    pub max_upload_bytes: u64,
    /// Maximum number of files in one multi-upload request.
    pub max_files_per_upload: usize,
}

impl AppState {
    /// Create application state from loaded configuration.
    pub fn new(
        db: Database,
        sessions: Arc<dyn SessionStore>,
        storage: FileStorage,
        config: &Config,
    ) -> Self {
        Self {
            db,
            sessions,
            storage,
            session_ttl: Duration::from_secs(config.session.ttl_secs),
            max_upload_bytes: config.files.max_upload_size_mb * 1024 * 1024,
            max_files_per_upload: config.files.max_files_per_upload,
        }
    }
}
