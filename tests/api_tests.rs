//! API 集成测试（需要 PostgreSQL）
//!
//! 运行方式：TEST_DATABASE_URL=... cargo test -- --ignored

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use serial_test::serial;
use tower::ServiceExt;

async fn setup_app() -> Router {
    let config = common::create_test_config();
    let pool = common::setup_test_db(&config).await;
    mygram_api::routes::create_router(common::create_test_app_state(pool))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn register(app: &Router, username: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": "password123",
            "age": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["id"].as_i64().unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/v1/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

async fn token_for(app: &Router, email: &str) -> String {
    let (status, body) = login(app, email, "password123").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_register_and_login() {
    let app = setup_app().await;

    let user_id = register(&app, "rizal", "rizal@gmail.com").await;

    let (status, body) = login(&app, "rizal@gmail.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user"]["id"], user_id);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_app().await;
    register(&app, "rizal", "rizal@gmail.com").await;

    let (wrong_status, wrong_body) = login(&app, "rizal@gmail.com", "password124").await;
    let (unknown_status, unknown_body) = login(&app, "nobody@gmail.com", "password123").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["error"]["message"], unknown_body["error"]["message"]);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_register_rejects_duplicates_and_invalid_input() {
    let app = setup_app().await;
    register(&app, "rizal", "rizal@gmail.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({
            "username": "other",
            "email": "rizal@gmail.com",
            "password": "password123",
            "age": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({
            "username": "kid",
            "email": "kid@gmail.com",
            "password": "password123",
            "age": 8
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({
            "username": "longmail",
            "email": format!("{}@{}.com", "a".repeat(64), "b".repeat(40)),
            "password": "password123",
            "age": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({
            "username": "u".repeat(300),
            "email": "longname@gmail.com",
            "password": "password123",
            "age": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({
            "username": "shorty",
            "email": "shorty@gmail.com",
            "password": "abc",
            "age": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_photo_ownership_end_to_end() {
    let app = setup_app().await;
    let alice_id = register(&app, "alice", "alice@gmail.com").await;
    register(&app, "bob", "bob@gmail.com").await;
    let alice = token_for(&app, "alice@gmail.com").await;
    let bob = token_for(&app, "bob@gmail.com").await;

    let (status, photo) = send(
        &app,
        "POST",
        "/api/v1/photos",
        Some(&alice),
        Some(json!({
            "title": "sunset",
            "caption": "at the beach",
            "photo_url": "https://example.com/sunset.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(photo["user_id"], alice_id);
    assert_eq!(photo["user"]["username"], "alice");
    assert!(photo["user"].get("password_hash").is_none());
    let uri = format!("/api/v1/photos/{}", photo["id"]);

    // Bob 不能修改或删除 Alice 的照片
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&bob),
        Some(json!({ "title": "hijacked", "caption": "mine now" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, current) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["title"], "sunset");
    assert_eq!(current["user"]["id"], alice_id);

    let (status, listing) = send(&app, "GET", "/api/v1/photos", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["photos"][0]["user"]["email"], "alice@gmail.com");

    // Alice 可以
    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&alice),
        Some(json!({ "title": "sunrise", "caption": "early" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "sunrise");

    let (status, _) = send(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_comment_requires_existing_photo() {
    let app = setup_app().await;
    register(&app, "alice", "alice@gmail.com").await;
    let alice = token_for(&app, "alice@gmail.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/comments/999",
        Some(&alice),
        Some(json!({ "message": "nice" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // 需要数据库
#[serial]
async fn test_user_can_only_delete_self() {
    let app = setup_app().await;
    let alice_id = register(&app, "alice", "alice@gmail.com").await;
    let bob_id = register(&app, "bob", "bob@gmail.com").await;
    let alice = token_for(&app, "alice@gmail.com").await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/users/{}", bob_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/users/{}", alice_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 账户删除后，旧令牌不能再创建资源
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/social-media",
        Some(&alice),
        Some(json!({ "name": "ig", "socialMediaURL": "https://instagram.com/alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
