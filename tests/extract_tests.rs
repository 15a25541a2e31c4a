//! 请求解析失败时的错误响应测试
//!
//! 提取器在访问数据库之前拒绝请求，因此使用延迟连接池即可。

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("error body should be JSON")
}

fn bearer() -> String {
    format!("Bearer {}", common::test_token_service().create_token(1).unwrap())
}

#[tokio::test]
async fn test_non_numeric_path_id_is_400_json() {
    let app = mygram_api::routes::create_router(common::create_lazy_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/photos/abc")
                .header(header::AUTHORIZATION, bearer())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"t","caption":"c"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], 400);
    assert!(json["error"]["message"].is_string());
    assert!(json["error"]["request_id"].is_string());
}

#[tokio::test]
async fn test_public_get_with_bad_id_is_400_json() {
    let app = mygram_api::routes::create_router(common::create_lazy_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], 400);
}

#[tokio::test]
async fn test_malformed_json_is_400_json() {
    let app = mygram_api::routes::create_router(common::create_lazy_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], 400);
}

#[tokio::test]
async fn test_missing_content_type_is_400_json() {
    let app = mygram_api::routes::create_router(common::create_lazy_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/login")
                .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], 400);
}

#[tokio::test]
async fn test_missing_field_is_422_json() {
    let app = mygram_api::routes::create_router(common::create_lazy_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"rizal"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], 422);
}
