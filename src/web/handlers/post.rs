//! Post handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::board::{Post, PostDetail, PostListing, PostService, PostUpdate};
use crate::web::dto::{
    ApiResponse, CreatePostRequest, MessageResponse, PaginationQuery, PostListResponse,
    RankingQuery, SearchQuery, UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// GET /api/posts - Paginated post list, newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let service = PostService::new(&state.db);
    let page = service.list(pagination.page, pagination.limit).await?;

    Ok(Json(page.into()))
}

/// GET /api/posts/:id - Fetch a post, incrementing its view counter.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<PostDetail>>, ApiError> {
    let service = PostService::new(&state.db);
    let post = service.get(post_id).await?;

    Ok(Json(ApiResponse::new(post)))
}

/// POST /api/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let service = PostService::new(&state.db);
    let post = service.create(&user_id, &req.title, &req.body).await?;

    Ok(Json(ApiResponse::new(post)))
}

/// PUT /api/posts/:id - Update a post (owner only).
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let update = PostUpdate {
        title: req.title,
        body: req.body,
    };

    let service = PostService::new(&state.db);
    let post = service.update(post_id, update, &user_id).await?;

    Ok(Json(ApiResponse::new(post)))
}

/// DELETE /api/posts/:id - Delete a post and its comments (owner only).
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let service = PostService::new(&state.db);
    service.delete(post_id, &user_id).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new("Post deleted"))))
}

/// GET /api/posts/search?q= - Keyword search over titles and bodies.
pub async fn search_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<PostListing>>>, ApiError> {
    let service = PostService::new(&state.db);
    let posts = service.search(&query.q).await?;

    Ok(Json(ApiResponse::new(posts)))
}

/// GET /api/posts/recent?limit= - Newest posts.
pub async fn recent_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<ApiResponse<Vec<PostListing>>>, ApiError> {
    let service = PostService::new(&state.db);
    let posts = service.recent(query.limit()).await?;

    Ok(Json(ApiResponse::new(posts)))
}

/// GET /api/posts/popular?limit= - Most-commented posts.
pub async fn popular_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<ApiResponse<Vec<PostListing>>>, ApiError> {
    let service = PostService::new(&state.db);
    let posts = service.popular(query.limit()).await?;

    Ok(Json(ApiResponse::new(posts)))
}

/// GET /api/posts/user/:user_id - A user's posts, newest first.
pub async fn list_posts_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PostListing>>>, ApiError> {
    let service = PostService::new(&state.db);
    let posts = service.list_by_user(&user_id).await?;

    Ok(Json(ApiResponse::new(posts)))
}
