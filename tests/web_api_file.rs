//! Web API file upload tests.
//!
//! Integration tests for the upload endpoints and upload serving.

mod common;

use axum::http::header::COOKIE;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::Value;

use common::{session_cookie, signup_and_login, spawn_app, TEST_MAX_FILES, TEST_MAX_UPLOAD_MB};

fn text_part(content: &[u8], filename: &str) -> Part {
    Part::bytes(content.to_vec())
        .file_name(filename.to_string())
        .mime_type("text/plain")
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let app = spawn_app().await;

    let form = MultipartForm::new().add_part("file", text_part(b"hello", "hello.txt"));
    let response = app.server.post("/api/upload").multipart(form).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_single_file_round_trip() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let form = MultipartForm::new().add_part("file", text_part(b"hello world", "hello.txt"));
    let response = app
        .server
        .post("/api/upload")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let url = body["data"]["url"].as_str().unwrap();

    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".txt"));
    assert_eq!(body["data"]["filename"], "hello.txt");
    assert_eq!(body["data"]["size"], 11);
    assert_eq!(body["data"]["type"], "file");
    assert_eq!(body["data"]["mime_type"], "text/plain");

    // The stored file is served back by path
    let served = app.server.get(url).await;
    served.assert_status_ok();
    assert_eq!(served.text(), "hello world");
}

#[tokio::test]
async fn test_upload_classifies_images() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
            .file_name("photo.png")
            .mime_type("image/png"),
    );
    let response = app
        .server
        .post("/api/upload")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["type"], "image");
    assert_eq!(body["data"]["mime_type"], "image/png");
}

#[tokio::test]
async fn test_upload_too_large_rejected() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let oversized = vec![0u8; (TEST_MAX_UPLOAD_MB * 1024 * 1024 + 1) as usize];
    let form = MultipartForm::new().add_part("file", text_part(&oversized, "big.bin"));
    let response = app
        .server
        .post("/api/upload")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app
        .server
        .post("/api/upload")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_multiple_files() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let form = MultipartForm::new()
        .add_part("files", text_part(b"one", "one.txt"))
        .add_part("files", text_part(b"two", "two.txt"));
    let response = app
        .server
        .post("/api/upload/multiple")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let files = body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["filename"], "one.txt");
    assert_eq!(files[1]["filename"], "two.txt");
}

#[tokio::test]
async fn test_upload_multiple_reports_per_file_failures() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let oversized = vec![0u8; (TEST_MAX_UPLOAD_MB * 1024 * 1024 + 1) as usize];
    let form = MultipartForm::new()
        .add_part("files", text_part(b"fine", "fine.txt"))
        .add_part("files", text_part(&oversized, "big.bin"));
    let response = app
        .server
        .post("/api/upload/multiple")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    // The batch succeeds; the oversized file fails individually
    response.assert_status_ok();
    let body: Value = response.json();
    let files = body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0]["url"].is_string());
    assert!(files[1]["error"]
        .as_str()
        .unwrap()
        .contains("big.bin"));
}

#[tokio::test]
async fn test_upload_multiple_too_many_files() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    let mut form = MultipartForm::new();
    for i in 0..(TEST_MAX_FILES + 1) {
        form = form.add_part("files", text_part(b"x", &format!("file{i}.txt")));
    }
    let response = app
        .server
        .post("/api/upload/multiple")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_served_uploads_are_isolated_per_name() {
    let app = spawn_app().await;
    let token = signup_and_login(&app.server, "alice", "password123").await;

    // Two uploads of the same original name get distinct URLs
    let form = MultipartForm::new().add_part("file", text_part(b"first", "same.txt"));
    let first = app
        .server
        .post("/api/upload")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await
        .json::<Value>();

    let form = MultipartForm::new().add_part("file", text_part(b"second", "same.txt"));
    let second = app
        .server
        .post("/api/upload")
        .add_header(COOKIE, session_cookie(&token))
        .multipart(form)
        .await
        .json::<Value>();

    let first_url = first["data"]["url"].as_str().unwrap();
    let second_url = second["data"]["url"].as_str().unwrap();
    assert_ne!(first_url, second_url);

    assert_eq!(app.server.get(first_url).await.text(), "first");
    assert_eq!(app.server.get(second_url).await.text(), "second");
}

#[tokio::test]
async fn test_missing_upload_is_404() {
    let app = spawn_app().await;

    let response = app.server.get("/uploads/no-such-file.txt").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
