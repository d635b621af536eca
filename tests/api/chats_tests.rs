//! Chat API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::{body_json, two_users, TestApp};

// ---- create ----

#[tokio::test]
async fn test_create_chat_success() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;

    let chat = app.create_chat(&user, &format!("[{}]", mock.id)).await;

    let participants = chat["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0]["id"], user.id);
    assert_eq!(participants[1]["id"], mock.id);
    assert_eq!(chat["creator"]["id"], user.id);
    assert!(chat["created_at"].is_string());
}

#[tokio::test]
async fn test_create_chat_success_no_invited() {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;

    let chat = app.create_chat(&user, "[]").await;

    let participants = chat["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["id"], user.id);
    assert_eq!(chat["creator"]["id"], user.id);
}

#[tokio::test]
async fn test_create_chat_accepts_native_array() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;

    let response = app
        .post_json_auth(
            "/api/chats/create",
            json!({"invited": [mock.id, mock.id]}),
            &user.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let chat = body_json(response).await["chat"].clone();
    assert_eq!(chat["participants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_chat_form_encoded() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;

    let form = format!("invited=%5B{}%5D", mock.id);
    let response = app
        .post_form("/api/chats/create", &form, Some(&user.token))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let chat = body_json(response).await["chat"].clone();
    let participants = chat["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[1]["id"], mock.id);
}

#[tokio::test]
async fn test_create_chat_empty_body_is_missing_invited() {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;

    let response = app
        .request("POST", "/api/chats/create", Some(&user.token), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!(["`invited` parameter should not be missing"])
    );
}

#[tokio::test]
async fn test_send_message_form_encoded() {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;
    let chat = app.create_chat(&user, "[]").await;
    let chat_id = chat["id"].as_i64().unwrap();

    let form = format!("chat_id={}&text=Hello%21", chat_id);
    let response = app
        .post_form("/api/chats/send_message", &form, Some(&user.token))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[test_case(json!({"invited": "[1,3["}), "`invited` parameter is a json-like list of integers" ; "invalid json")]
#[test_case(json!({"invited": "{\"data\": [1, 2]}"}), "`invited` parameter is a list of integers" ; "not a list")]
#[test_case(json!({"invited": 5}), "`invited` parameter is a list of integers" ; "bare number")]
#[test_case(json!({}), "`invited` parameter should not be missing" ; "missing")]
#[test_case(json!({"invited": null}), "`invited` parameter should not be missing" ; "null")]
#[test_case(json!({"invited": "[2, \"a\"]"}), "An entry of the invited list should be an integer" ; "invalid entry")]
#[test_case(json!({"invited": "[2, 1]"}), "You cannot invite yourself to a chat" ; "invited myself")]
#[test_case(json!({"invited": "[0, 2]"}), "One or more invited users are not registered yet" ; "unknown participant")]
#[test_case(json!({"invited": "[\"a\", 0]"}), "An entry of the invited list should be an integer" ; "type error reported first")]
#[tokio::test]
async fn test_create_chat_rejects(body: serde_json::Value, expected: &str) {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    assert_eq!((user.id, mock.id), (1, 2));

    let response = app
        .post_json_auth("/api/chats/create", body, &user.token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!([expected]));

    // Nothing was stored
    let response = app.get_auth("/api/chats/user", &user.token).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[test_case("GET", "/api/chats/create" ; "create with wrong method")]
#[test_case("POST", "/api/chats/create" ; "create")]
#[test_case("GET", "/api/chats/0/send_message" ; "send with wrong method")]
#[test_case("POST", "/api/chats/send_message" ; "send by body")]
#[test_case("GET", "/api/chats/0/history" ; "history")]
#[test_case("GET", "/api/chats/user" ; "user chats")]
#[tokio::test]
async fn test_not_authenticated_user_fail(method: &str, uri: &str) {
    let app = TestApp::new();

    let response = app.request(method, uri, None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.request(method, uri, Some("unknown"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test_case("/nope" ; "unknown top level path")]
#[test_case("/api/chats/0/unknown" ; "unknown chat action")]
#[tokio::test]
async fn test_unknown_path_is_not_found(uri: &str) {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;

    let response = app.get(uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get_auth(uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---- send_message ----

#[tokio::test]
async fn test_send_message_user_success() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    let response = app.send_message(&user, chat_id, "Hello!").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let message = body_json(response).await["message"].clone();
    assert_eq!(message["author"]["id"], user.id);
    assert_eq!(message["text"], "Hello!");
}

#[tokio::test]
async fn test_send_message_mock_user_success() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    let response = app.send_message(&mock, chat_id, "Hello!").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let message = body_json(response).await["message"].clone();
    assert_eq!(message["author"]["id"], mock.id);
    assert_eq!(message["text"], "Hello!");
}

#[tokio::test]
async fn test_send_message_by_body_chat_id() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .post_json_auth(
            "/api/chats/send_message",
            json!({"chat_id": chat_id, "text": "Hello!"}),
            &user.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post_json_auth(
            "/api/chats/send_message",
            json!({"chat_id": chat_id.to_string(), "text": "Again"}),
            &user.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_send_message_fail_missing_text() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .post_json_auth(
            &format!("/api/chats/{}/send_message", chat_id),
            json!({}),
            &user.token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!(["text: This field is required."]));
}

#[tokio::test]
async fn test_missing_text_is_reported_before_chat_check() {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;

    let response = app
        .post_json_auth("/api/chats/0/send_message", json!({"text": ""}), &user.token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!(["text: This field may not be blank."])
    );
}

#[tokio::test]
async fn test_send_message_fail_not_participant() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let outsider = app.register("fail_user", "test").await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    let response = app.send_message(&outsider, chat_id, "Hello!").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!(["Chat does not exist"]));
}

#[test_case("/api/chats/0/send_message", json!({"text": "Hello!"}) ; "unknown path id")]
#[test_case("/api/chats/abc/send_message", json!({"text": "Hello!"}) ; "non numeric path id")]
#[test_case("/api/chats/send_message", json!({"text": "Hello!"}) ; "missing body id")]
#[test_case("/api/chats/send_message", json!({"chat_id": "x", "text": "Hello!"}) ; "non numeric body id")]
#[tokio::test]
async fn test_send_message_fail_invalid_chat_id(uri: &str, body: serde_json::Value) {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;

    let response = app.post_json_auth(uri, body, &user.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!(["Chat does not exist"]));
}

// ---- history ----

#[tokio::test]
async fn test_get_history_success() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    for (author, text) in [(&user, "Hey!"), (&user, "Whats up?"), (&mock, "Nothing")] {
        let response = app.send_message(author, chat_id, text).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let expected = vec![
        (user.id, "Hey!"),
        (user.id, "Whats up?"),
        (mock.id, "Nothing"),
    ];

    // Both participants see the same history
    for reader in [&user, &mock] {
        let response = app
            .get_auth(&format!("/api/chats/{}/history", chat_id), &reader.token)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let history = body_json(response).await;
        let got: Vec<(i64, &str)> = history
            .as_array()
            .unwrap()
            .iter()
            .map(|m| {
                (
                    m["author"]["id"].as_i64().unwrap(),
                    m["text"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(got, expected);
    }
}

#[tokio::test]
async fn test_get_history_fail_user() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    let outsider = app.register("fail_user", "test").await;
    let chat_id = app.create_chat(&user, &format!("[{}]", mock.id)).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .get_auth(&format!("/api/chats/{}/history", chat_id), &outsider.token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!("Chat does not exist"));
}

#[test_case("/api/chats/0/history" ; "unknown id")]
#[test_case("/api/chats/abc/history" ; "non numeric id")]
#[tokio::test]
async fn test_get_history_fail_invalid_chat_id(uri: &str) {
    let app = TestApp::new();
    let (user, _) = two_users(&app).await;

    let response = app.get_auth(uri, &user.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!("Chat does not exist"));
}

// ---- user chats ----

#[tokio::test]
async fn test_user_chats() {
    let app = TestApp::new();
    let (user, mock) = two_users(&app).await;
    app.create_chat(&user, &format!("[{}]", mock.id)).await;
    app.create_chat(&user, &format!("[{}]", mock.id)).await;
    app.create_chat(&mock, "[]").await;

    let response = app.get_auth("/api/chats/user", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let chats = body_json(response).await;
    let creators: Vec<i64> = chats
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["creator"]["id"].as_i64().unwrap())
        .collect();
    assert_eq!(creators, vec![user.id, user.id]);

    let response = app.get_auth("/api/chats/user", &mock.token).await;
    let chats = body_json(response).await;
    let chats = chats.as_array().unwrap();
    let creators: Vec<i64> = chats
        .iter()
        .map(|c| c["creator"]["id"].as_i64().unwrap())
        .collect();
    assert_eq!(creators, vec![user.id, user.id, mock.id]);

    // Previews carry no participant list
    assert!(chats[0].get("participants").is_none());
}
