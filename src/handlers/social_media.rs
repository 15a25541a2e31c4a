//! 社交账号的 HTTP 处理器

use super::user::require_existing_caller;
use crate::{
    auth::{load_owned, AuthContext, Owned},
    error::AppError,
    extract::{ApiJson, ApiPath},
    middleware::AppState,
    models::social_media::*,
    repository::{SocialMediaRepository, UserRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

pub async fn list_social_media(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let entries = SocialMediaRepository::new(state.db.clone()).list().await?;
    let entries = UserRepository::new(state.db.clone())
        .attach_owners(entries)
        .await?;

    Ok(Json(json!({
        "social_media": entries,
        "count": entries.len()
    })))
}

pub async fn get_social_media(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let entry = SocialMediaRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(SocialMedia::KIND))?;

    let entry = UserRepository::new(state.db.clone())
        .attach_owner(entry)
        .await?;

    Ok(Json(entry))
}

pub async fn create_social_media(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiJson(req): ApiJson<SocialMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_existing_caller(&state, auth_context).await?;

    let req = req.prepare();
    req.validate()?;

    let entry = SocialMediaRepository::new(state.db.clone())
        .create(&req, auth_context.user_id)
        .await?;
    let entry = UserRepository::new(state.db.clone())
        .attach_owner(entry)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_social_media(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<SocialMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = SocialMediaRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    let req = req.prepare();
    req.validate()?;

    let entry = repo
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found(SocialMedia::KIND))?;
    let entry = UserRepository::new(state.db.clone())
        .attach_owner(entry)
        .await?;

    Ok(Json(entry))
}

pub async fn delete_social_media(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = SocialMediaRepository::new(state.db.clone());
    load_owned(auth_context.user_id, || repo.find_by_id(id)).await?;

    repo.delete(id).await?;

    Ok(Json(json!({ "message": "Social media deleted" })))
}
