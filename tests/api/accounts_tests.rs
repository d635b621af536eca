//! Account API Tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_bytes, body_json, TestApp};

#[tokio::test]
async fn test_registration() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/accounts/register",
            json!({"username": "test", "password": "test"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["user"], json!({"id": 1, "username": "test"}));
    assert_eq!(body["token"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_registration_duplicate_username() {
    let app = TestApp::new();
    app.register("test", "test").await;

    let response = app
        .post_json(
            "/api/accounts/register",
            json!({"username": "test", "password": "other"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!(["username: A user with that username already exists."])
    );
}

#[tokio::test]
async fn test_registration_missing_fields() {
    let app = TestApp::new();

    let response = app.post_json("/api/accounts/register", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!([
            "password: This field is required.",
            "username: This field is required."
        ])
    );
}

#[tokio::test]
async fn test_registration_invalid_username() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/accounts/register",
            json!({"username": "no spaces", "password": "test"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body[0].as_str().unwrap().starts_with("username: Enter a valid username."));
}

#[tokio::test]
async fn test_malformed_body_is_a_single_error() {
    let app = TestApp::new();
    let user = app.register("test", "test").await;

    let response = app
        .post_raw_auth("/api/chats/create", "{not json", &user.token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("test", "test").await;

    let response = app
        .post_json(
            "/api/accounts/login",
            json!({"username": "test", "password": "test"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "test");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_form_encoded_registration_and_login() {
    let app = TestApp::new();

    let response = app
        .post_form("/api/accounts/register", "username=test&password=test", None)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post_form("/api/accounts/login", "username=test&password=test", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["username"], "test");
}

#[tokio::test]
async fn test_empty_login_body_reports_required_fields() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/accounts/login", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!([
            "password: This field is required.",
            "username: This field is required."
        ])
    );
}

#[tokio::test]
async fn test_login_fail() {
    let app = TestApp::new();
    app.register("test", "test").await;

    let response = app
        .post_json(
            "/api/accounts/login",
            json!({"username": "incorrect", "password": "incorrect"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!(["Incorrect credentials"]));

    let response = app
        .post_json(
            "/api/accounts/login",
            json!({"username": "test", "password": "wrong"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_each_login_issues_a_separate_token() {
    let app = TestApp::new();
    let user = app.register("test", "test").await;
    let second = app.login("test", "test").await;
    assert_ne!(user.token, second);

    // Both remain valid
    let response = app.get_auth("/api/chats/user", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.get_auth("/api/chats/user", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_inactive_user_cannot_authenticate() {
    let app = TestApp::new();
    let user = app.register("test", "test").await;
    assert!(app.store.set_active(user.id, false));

    let response = app.get_auth("/api/chats/user", &user.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_json(
            "/api/accounts/login",
            json!({"username": "test", "password": "test"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_authenticated_and_logout() {
    let app = TestApp::new();
    let user = app.register("test", "test").await;

    let response = app
        .request("POST", "/api/accounts/logout", Some(&user.token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The token is gone
    let response = app.get_auth("/api/chats/user", &user.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_unauthenticated_and_failed_logout() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/accounts/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Token"
    );
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_bearer_scheme_is_rejected() {
    let app = TestApp::new();
    let user = app.register("test", "test").await;

    let response = app
        .get_with_authorization("/api/chats/user", &format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
