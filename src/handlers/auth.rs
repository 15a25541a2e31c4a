//! 认证相关的 HTTP 处理器

use crate::{
    error::AppError,
    extract::ApiJson,
    middleware::AppState,
    models::auth::*,
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let req = LoginRequest {
        email: req.email.trim().to_string(),
        ..req
    };
    req.validate()?;

    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}
