//! corkboard - a discussion board backend.
//!
//! User accounts with cookie sessions, post and comment CRUD with ownership
//! checks, pagination, keyword search, popularity ranking, and file upload,
//! backed by SQLite.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, require_owner, validate_password, verify_password, MemorySessionStore,
    PasswordError, PermissionError, Session, SessionError, SessionStore, SqliteSessionStore,
    ValidationError, DEFAULT_SESSION_TTL_SECS,
};
pub use board::{
    Comment, CommentDetail, CommentService, Page, Post, PostDetail, PostListing, PostService,
    PostUpdate,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{BoardError, Result};
pub use file::{FileKind, FileStorage};
pub use web::WebServer;
