//! Test Helper Utilities
//!
//! Shared utilities for driving the lexi-dict router in tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use lexi_common::config::DictionarySettings;
use lexi_common::db::init_memory_database;
use lexi_dict::{build_router, AppState};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

pub const BOUNDARY: &str = "lexi-test-boundary";

/// Create an app over a fresh in-memory database
pub async fn setup_app_with(settings: DictionarySettings) -> Router {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(db, settings))
}

pub async fn setup_app() -> Router {
    setup_app_with(DictionarySettings::default()).await
}

/// Create request with an optional bearer token and JSON body
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Multipart upload of one file in the `file` field
pub fn upload_request(token: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/words/import")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send a request; the body is `Value::Null` when empty
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    };
    (status, body)
}

/// Register a user and return their API token
pub async fn sign_up(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/users",
            None,
            Some(serde_json::json!({ "username": username })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sign up failed: {}", body);
    body["token"].as_str().expect("token in response").to_string()
}

/// Create a language and return its JSON representation
pub async fn create_language(app: &Router, token: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/languages",
            Some(token),
            Some(serde_json::json!({ "name": name })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create language failed: {}", body);
    body
}

/// Create a word with one hint and translation; returns the word detail
pub async fn create_word(
    app: &Router,
    token: &str,
    word: &str,
    word_language: &Value,
    translation_language: &Value,
) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/words",
            Some(token),
            Some(serde_json::json!({
                "word": word,
                "word_language": word_language["id"],
                "description": format!("{} description", word),
                "hint": format!("{} hint", word),
                "translation": format!("{} translation", word),
                "translation_language": translation_language["id"],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create word failed: {}", body);
    body
}
