//! 访问闸门：令牌认证中间件

use super::{AuthError, TokenService, UserId};
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展，仅在当前请求内有效）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从 Authorization 头提取 Bearer 令牌（认证方案不区分大小写）
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// 认证中间件 - 必须认证
///
/// 任何令牌错误都在调用 handler 之前短路为 401。
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = extract_token(req.headers())
        .and_then(|token| tokens.extract_identity(token))
        .map_err(|e| {
            tracing::debug!(reason = %e, uri = %req.uri(), "Request rejected by auth gate");
            AppError::from(e)
        })?;

    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}
