//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_comment, create_post, delete_comment, delete_post, get_comment, get_post, list_comments_by_post,
    list_comments_by_user, list_posts, list_posts_by_user, login, logout, me, popular_posts,
    recent_posts, search_posts, signup, update_comment, update_post, upload_file, upload_files,
    AppState,
};
use super::middleware::{create_cors_layer, session_auth, SessionLayer};

/// Create the main API router.
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let session_layer = Arc::new(SessionLayer::new(state.sessions.clone(), state.session_ttl));

    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me));

    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/search", get(search_posts))
        .route("/recent", get(recent_posts))
        .route("/popular", get(popular_posts))
        .route("/user/:user_id", get(list_posts_by_user))
        .route(
            "/:id",
            get(get_post).put(update_post).delete(delete_post),
        );

    let comment_routes = Router::new()
        .route("/", post(create_comment))
        .route("/post/:post_id", get(list_comments_by_post))
        .route("/user/:user_id", get(list_comments_by_user))
        .route(
            "/:id",
            get(get_comment).put(update_comment).delete(delete_comment),
        );

    // The axum body limit stays above the per-file cap so oversized uploads
    // reach the handler and get a proper 413 instead of a closed connection.
    let upload_body_limit = (state.max_upload_bytes as usize)
        .saturating_mul(state.max_files_per_upload)
        .saturating_add(1024 * 1024);
    let upload_routes = Router::new()
        .route("/", post(upload_file))
        .route("/multiple", post(upload_files))
        .layer(DefaultBodyLimit::max(upload_body_limit));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/comments", comment_routes)
        .nest("/upload", upload_routes);

    let uploads_dir = state.storage.base_path().to_path_buf();

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let layer = session_layer.clone();
                    session_auth(layer, req, next)
                })),
        )
        .with_state(state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
