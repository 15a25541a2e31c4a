//! 评论的 HTTP 处理器

use super::user::require_existing_caller;
use crate::{
    auth::{load_owned, AuthContext, Owned},
    error::AppError,
    extract::{ApiJson, ApiPath},
    middleware::AppState,
    models::{comment::*, photo::Photo},
    repository::{CommentRepository, PhotoRepository, UserRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let comments = CommentRepository::new(state.db.clone()).list().await?;
    let comments = UserRepository::new(state.db.clone())
        .attach_owners(comments)
        .await?;

    Ok(Json(json!({
        "comments": comments,
        "count": comments.len()
    })))
}

pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comment = CommentRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(Comment::KIND))?;

    let comment = UserRepository::new(state.db.clone())
        .attach_owner(comment)
        .await?;

    Ok(Json(comment))
}

/// 评论照片，路径参数为照片 ID
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(photo_id): ApiPath<i64>,
    ApiJson(req): ApiJson<CommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_existing_caller(&state, auth_context).await?;

    PhotoRepository::new(state.db.clone())
        .find_by_id(photo_id)
        .await?
        .ok_or_else(|| AppError::not_found(Photo::KIND))?;

    let req = req.prepare();
    req.validate()?;

    let comment = CommentRepository::new(state.db.clone())
        .create(&req, photo_id, auth_context.user_id)
        .await?;
    let comment = UserRepository::new(state.db.clone())
        .attach_owner(comment)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<CommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    let req = req.prepare();
    req.validate()?;

    let comment = repo
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found(Comment::KIND))?;
    let comment = UserRepository::new(state.db.clone())
        .attach_owner(comment)
        .await?;

    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CommentRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    repo.delete(id).await?;

    Ok(Json(json!({ "message": "Comment deleted" })))
}
