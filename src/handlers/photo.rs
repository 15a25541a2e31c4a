//! 照片的 HTTP 处理器
//! 响应中附带属主资料

use super::user::require_existing_caller;
use crate::{
    auth::{load_owned, AuthContext, Owned},
    error::AppError,
    extract::{ApiJson, ApiPath},
    middleware::AppState,
    models::photo::*,
    repository::{PhotoRepository, UserRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 列出照片（公开）
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let photos = PhotoRepository::new(state.db.clone()).list().await?;
    let photos = UserRepository::new(state.db.clone())
        .attach_owners(photos)
        .await?;

    Ok(Json(json!({
        "photos": photos,
        "count": photos.len()
    })))
}

/// 获取照片详情（公开）
pub async fn get_photo(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let photo = PhotoRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(Photo::KIND))?;

    let photo = UserRepository::new(state.db.clone())
        .attach_owner(photo)
        .await?;

    Ok(Json(photo))
}

/// 上传照片，属主为当前用户
pub async fn create_photo(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiJson(req): ApiJson<CreatePhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_existing_caller(&state, auth_context).await?;

    let req = req.prepare();
    req.validate()?;

    let photo = PhotoRepository::new(state.db.clone())
        .create(&req, auth_context.user_id)
        .await?;
    let photo = UserRepository::new(state.db.clone())
        .attach_owner(photo)
        .await?;

    Ok((StatusCode::CREATED, Json(photo)))
}

/// 更新照片（仅属主）
pub async fn update_photo(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdatePhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PhotoRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    let req = req.prepare();
    req.validate()?;

    let photo = repo
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found(Photo::KIND))?;
    let photo = UserRepository::new(state.db.clone())
        .attach_owner(photo)
        .await?;

    Ok(Json(photo))
}

/// 删除照片（仅属主）
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PhotoRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    repo.delete(id).await?;

    Ok(Json(json!({ "message": "Photo deleted" })))
}
