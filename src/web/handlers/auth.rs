//! Authentication handlers.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use crate::db::{NewUser, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, MeResponse, MessageResponse, SignupRequest, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{CurrentUser, SESSION_COOKIE};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// POST /api/auth/signup - Create a user account.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let password_hash = crate::hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal("Failed to create user")
    })?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .create(&NewUser::new(&req.id, &req.username, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(Json(ApiResponse::new(UserInfo {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
    })))
}

/// POST /api/auth/login - Create a session and set the cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserInfo>>), ApiError> {
    if req.id.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Id and password are required"));
    }

    // Unknown id and wrong password get the same answer
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&req.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    crate::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let session = state
        .sessions
        .create(&user.id, state.session_ttl)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create session: {}", e);
            ApiError::internal("Failed to create session")
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    let jar = jar.add(session_cookie(session.token));
    Ok((
        jar,
        Json(ApiResponse::new(UserInfo {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        })),
    ))
}

/// POST /api/auth/logout - Destroy the session and clear the cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        // Destroying is idempotent; a stale cookie is not an error
        if let Err(e) = state.sessions.destroy(cookie.value()).await {
            tracing::warn!("Failed to destroy session: {}", e);
        }
    }

    let jar = jar.remove(removal_cookie());
    Ok((
        jar,
        Json(ApiResponse::new(MessageResponse::new("Logged out"))),
    ))
}

/// GET /api/auth/me - Resolve the acting user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let post_count = repo.post_count(&user_id).await?;
    let comment_count = repo.comment_count(&user_id).await?;

    Ok(Json(ApiResponse::new(MeResponse {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
        post_count,
        comment_count,
    })))
}
