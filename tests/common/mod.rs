//! Test helpers for Web API integration tests.
//!
//! Builds a TestServer over an in-memory database, an in-memory session
//! store, and a temp-dir upload storage.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{HeaderValue, COOKIE};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use corkboard::web::handlers::AppState;
use corkboard::web::{create_health_router, create_router};
use corkboard::{Config, Database, FileStorage, MemorySessionStore};

/// Per-file upload cap used in tests, in megabytes.
pub const TEST_MAX_UPLOAD_MB: u64 = 1;

/// Multi-upload file count cap used in tests.
pub const TEST_MAX_FILES: usize = 3;

/// A running test application.
pub struct TestApp {
    /// HTTP test server over the full router.
    pub server: TestServer,
    /// The underlying database, for direct assertions.
    pub db: Database,
    _upload_dir: TempDir,
}

/// Spawn a test app with the default session TTL.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_ttl(Duration::from_secs(60)).await
}

/// Spawn a test app with a custom session TTL.
pub async fn spawn_app_with_ttl(ttl: Duration) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let upload_dir = TempDir::new().expect("Failed to create upload dir");
    let storage = FileStorage::new(upload_dir.path()).expect("Failed to create storage");
    let sessions = Arc::new(MemorySessionStore::new());

    let mut config = Config::default();
    config.files.max_upload_size_mb = TEST_MAX_UPLOAD_MB;
    config.files.max_files_per_upload = TEST_MAX_FILES;

    let mut state = AppState::new(db.clone(), sessions, storage, &config);
    state.session_ttl = ttl;

    let router = create_router(Arc::new(state), &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        db,
        _upload_dir: upload_dir,
    }
}

/// Register a user.
pub async fn signup(server: &TestServer, id: &str, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "id": id,
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Log in and return the session token from the cookie.
pub async fn login(server: &TestServer, id: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "id": id,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    response.cookie("session_id").value().to_string()
}

/// Register a user and log in, returning the session token.
pub async fn signup_and_login(server: &TestServer, id: &str, password: &str) -> String {
    signup(server, id, &format!("{id} display"), password).await;
    login(server, id, password).await
}

/// Cookie header value carrying a session token.
pub fn session_cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("session_id={token}")).expect("valid cookie value")
}

/// Create a post as the given session, returning its id.
pub async fn create_post(server: &TestServer, token: &str, title: &str, body: &str) -> i64 {
    let response = server
        .post("/api/posts")
        .add_header(COOKIE, session_cookie(token))
        .json(&json!({
            "title": title,
            "body": body
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["data"]["id"]
        .as_i64()
        .expect("post id")
}

/// Create a comment as the given session, returning its id.
pub async fn create_comment(server: &TestServer, token: &str, post_id: i64, body: &str) -> i64 {
    let response = server
        .post("/api/comments")
        .add_header(COOKIE, session_cookie(token))
        .json(&json!({
            "post_id": post_id,
            "body": body
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["data"]["id"]
        .as_i64()
        .expect("comment id")
}
