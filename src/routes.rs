//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查与只读查询）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/v1/users/{id}", get(handlers::user::get_user))
        .route("/api/v1/users/{id}/photos", get(handlers::user::list_user_photos))
        .route("/api/v1/users/{id}/comments", get(handlers::user::list_user_comments))
        .route(
            "/api/v1/users/{id}/social-media",
            get(handlers::user::list_user_social_media),
        )
        .route("/api/v1/photos", get(handlers::photo::list_photos))
        .route("/api/v1/photos/{id}", get(handlers::photo::get_photo))
        .route("/api/v1/comments", get(handlers::comment::list_comments))
        .route("/api/v1/comments/{id}", get(handlers::comment::get_comment))
        .route(
            "/api/v1/social-media-all",
            get(handlers::social_media::list_social_media),
        )
        .route(
            "/api/v1/social-media/{id}",
            get(handlers::social_media::get_social_media),
        );

    // 认证路由（无需令牌）
    let auth_routes = Router::new()
        .route("/api/v1/login", post(handlers::auth::login))
        .route("/api/v1/users", post(handlers::user::register));

    // 需要认证的路由：所有写操作
    let authenticated_routes = Router::new()
        .route(
            "/api/v1/users/{id}",
            put(handlers::user::update_user).delete(handlers::user::delete_user),
        )
        // 照片
        .route("/api/v1/photos", post(handlers::photo::create_photo))
        .route(
            "/api/v1/photos/{id}",
            put(handlers::photo::update_photo).delete(handlers::photo::delete_photo),
        )
        // 评论（创建时路径参数为照片 ID）
        .route(
            "/api/v1/comments/{id}",
            post(handlers::comment::create_comment)
                .put(handlers::comment::update_comment)
                .delete(handlers::comment::delete_comment),
        )
        // 社交账号
        .route("/api/v1/social-media", post(handlers::social_media::create_social_media))
        .route(
            "/api/v1/social-media/{id}",
            put(handlers::social_media::update_social_media)
                .delete(handlers::social_media::delete_social_media),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            crate::auth::require_auth,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit_bytes))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
