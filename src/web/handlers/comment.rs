//! Comment handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::board::{Comment, CommentDetail, CommentService};
use crate::web::dto::{
    ApiResponse, CreateCommentRequest, MessageResponse, UpdateCommentRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// POST /api/comments - Create a comment on a post.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let service = CommentService::new(&state.db);
    let comment = service.create(&user_id, req.post_id, &req.body).await?;

    Ok(Json(ApiResponse::new(comment)))
}

/// GET /api/comments/:id - Fetch a comment.
pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> Result<Json<ApiResponse<CommentDetail>>, ApiError> {
    let service = CommentService::new(&state.db);
    let comment = service.get(comment_id).await?;

    Ok(Json(ApiResponse::new(comment)))
}

/// GET /api/comments/post/:post_id - Comments on a post, oldest first.
pub async fn list_comments_by_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<CommentDetail>>>, ApiError> {
    let service = CommentService::new(&state.db);
    let comments = service.list_by_post(post_id).await?;

    Ok(Json(ApiResponse::new(comments)))
}

/// GET /api/comments/user/:user_id - A user's comments, newest first.
pub async fn list_comments_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CommentDetail>>>, ApiError> {
    let service = CommentService::new(&state.db);
    let comments = service.list_by_user(&user_id).await?;

    Ok(Json(ApiResponse::new(comments)))
}

/// PUT /api/comments/:id - Update a comment (owner only).
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    Path(comment_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    let service = CommentService::new(&state.db);
    let comment = service.update(comment_id, &req.body, &user_id).await?;

    Ok(Json(ApiResponse::new(comment)))
}

/// DELETE /api/comments/:id - Delete a comment (owner only).
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let service = CommentService::new(&state.db);
    service.delete(comment_id, &user_id).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Comment deleted",
    ))))
}
