//! Health and Metrics Endpoint Tests

use axum::http::StatusCode;

use crate::common::{body_bytes, body_json, TestApp};

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

/// Test liveness probe endpoint
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");
}

/// The memory store is always reachable
#[tokio::test]
async fn test_readiness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store"]["kind"], "memory");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_counters() {
    let app = TestApp::new();
    let user = app.register("test", "test").await;
    app.create_chat(&user, "[]").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("chat_rooms_users_registered_total"));
    assert!(text.contains("chat_rooms_chats_created_total"));
    assert!(text.contains("chat_rooms_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
