//! 用户管理的 HTTP 处理器

use crate::{
    auth::{load_owned, AuthContext, UserId},
    error::AppError,
    extract::{ApiJson, ApiPath},
    middleware::AppState,
    models::user::*,
    repository::{CommentRepository, PhotoRepository, SocialMediaRepository, UserRepository},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let req = req.prepare();
    req.validate()?;

    let user = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// 获取用户详情（公开）
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(UserResponse::from(user)))
}

/// 更新用户资料（只能修改自己）
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    let req = req.prepare();
    req.validate()?;

    let user = repo
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(UserResponse::from(user)))
}

/// 删除用户（只能删除自己）
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    repo.delete(id).await?;
    tracing::info!(user_id = id, "User deleted");

    Ok(Json(json!({ "message": "User deleted" })))
}

/// 某用户的照片
pub async fn list_user_photos(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let photos = PhotoRepository::new(state.db.clone()).list_by_user(id).await?;
    let photos = UserRepository::new(state.db.clone())
        .attach_owners(photos)
        .await?;

    Ok(Json(json!({
        "photos": photos,
        "count": photos.len()
    })))
}

/// 某用户的评论
pub async fn list_user_comments(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let comments = CommentRepository::new(state.db.clone()).list_by_user(id).await?;
    let comments = UserRepository::new(state.db.clone())
        .attach_owners(comments)
        .await?;

    Ok(Json(json!({
        "comments": comments,
        "count": comments.len()
    })))
}

/// 某用户的社交账号
pub async fn list_user_social_media(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let entries = SocialMediaRepository::new(state.db.clone())
        .list_by_user(id)
        .await?;
    let entries = UserRepository::new(state.db.clone())
        .attach_owners(entries)
        .await?;

    Ok(Json(json!({
        "social_media": entries,
        "count": entries.len()
    })))
}

/// 创建资源前确认令牌对应的账户仍然存在
pub(crate) async fn require_existing_caller(
    state: &AppState,
    auth_context: AuthContext,
) -> Result<(), AppError> {
    if UserRepository::new(state.db.clone())
        .exists(auth_context.user_id)
        .await?
    {
        Ok(())
    } else {
        tracing::warn!(user_id = auth_context.user_id, "Token subject no longer exists");
        Err(AppError::Unauthorized)
    }
}
