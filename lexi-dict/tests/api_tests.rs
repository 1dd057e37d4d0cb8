//! Integration tests for lexi-dict API endpoints
//!
//! Tests cover:
//! - Health and sign-up (no auth required)
//! - Bearer token authentication
//! - Language and word CRUD, scoped to the caller
//! - Pagination clamping
//! - Cascading deletes

mod helpers;

use axum::http::StatusCode;
use helpers::{
    create_language, create_word, json_request, send, setup_app, setup_app_with, sign_up,
};
use lexi_common::config::DictionarySettings;
use serde_json::json;

// =============================================================================
// Public endpoints and authentication
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let app = setup_app().await;

    let (status, body) = send(&app, json_request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "lexi-dict");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = setup_app().await;

    for uri in ["/api/dictionary", "/api/words", "/api/languages"] {
        let (status, body) = send(&app, json_request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_unknown_token_rejected() {
    let app = setup_app().await;
    sign_up(&app, "usrnm").await;

    let (status, _) = send(&app, json_request("GET", "/api/words", Some("not-a-token"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_up_returns_usable_token() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;

    let (status, body) = send(&app, json_request("GET", "/api/dictionary", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recent_words"], json!([]));
    assert_eq!(body["languages"], json!([]));
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = setup_app().await;
    sign_up(&app, "usrnm").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/api/users", None, Some(json!({ "username": "usrnm" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// =============================================================================
// Languages
// =============================================================================

#[tokio::test]
async fn test_add_language_and_detail() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;

    let english = create_language(&app, &token, "English").await;
    assert_eq!(english["name"], "English");

    let uri = format!("/api/languages/{}", english["id"].as_str().unwrap());
    let (status, body) = send(&app, json_request("GET", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, english);
}

#[tokio::test]
async fn test_case_variant_language_conflicts() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    create_language(&app, &token, "English").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/languages", Some(&token), Some(json!({ "name": "eNGLISH" }))),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Language with that name already exists!");
}

#[tokio::test]
async fn test_same_language_name_for_different_users() {
    let app = setup_app().await;
    let token1 = sign_up(&app, "usrnm").await;
    let token2 = sign_up(&app, "usrnm2").await;

    create_language(&app, &token1, "English").await;
    create_language(&app, &token2, "English").await;
}

#[tokio::test]
async fn test_blank_language_name_rejected() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/languages", Some(&token), Some(json!({ "name": "  " }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_edit_language_rename_and_duplicate() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "Englsh").await;
    create_language(&app, &token, "Russian").await;
    let uri = format!("/api/languages/{}", english["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&token), Some(json!({ "name": "English" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "English");

    // Case change of its own name is allowed
    let (status, _) = send(
        &app,
        json_request("PUT", &uri, Some(&token), Some(json!({ "name": "ENGLISH" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request("PUT", &uri, Some(&token), Some(json!({ "name": "russian" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_other_users_language_forbidden() {
    let app = setup_app().await;
    let owner = sign_up(&app, "usrnm").await;
    let intruder = sign_up(&app, "usrnm2").await;
    let english = create_language(&app, &owner, "English").await;
    let uri = format!("/api/languages/{}", english["id"].as_str().unwrap());

    let (status, _) = send(&app, json_request("GET", &uri, Some(&intruder), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request("PUT", &uri, Some(&intruder), Some(json!({ "name": "Mine" }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&intruder), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Still there for the owner
    let (status, _) = send(&app, json_request("GET", &uri, Some(&owner), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_or_malformed_id_not_found() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;

    for uri in [
        "/api/languages/00000000-0000-0000-0000-000000000000",
        "/api/languages/not-a-uuid",
        "/api/words/00000000-0000-0000-0000-000000000000",
        "/api/words/12345",
    ] {
        let (status, body) = send(&app, json_request("GET", uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_delete_language_cascades() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "English").await;
    let russian = create_language(&app, &token, "Russian").await;
    let bus = create_word(&app, &token, "Bus", &english, &russian).await;
    let cat = create_word(&app, &token, "Кошка", &russian, &english).await;

    let uri = format!("/api/languages/{}", russian["id"].as_str().unwrap());
    let (status, body) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    // Word in the deleted language is gone
    let cat_uri = format!("/api/words/{}", cat["word"]["id"].as_str().unwrap());
    let (status, _) = send(&app, json_request("GET", &cat_uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Translation into the deleted language is gone, the word and hint remain
    let bus_uri = format!("/api/words/{}", bus["word"]["id"].as_str().unwrap());
    let (status, body) = send(&app, json_request("GET", &bus_uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"], json!([]));
    assert_eq!(body["hints"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Words
// =============================================================================

#[tokio::test]
async fn test_add_word_creates_hint_and_translation() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "English").await;
    let russian = create_language(&app, &token, "Russian").await;

    let detail = create_word(&app, &token, "Bus", &english, &russian).await;

    assert_eq!(detail["word"]["text"], "Bus");
    assert_eq!(detail["language"]["name"], "English");
    assert_eq!(detail["hints"][0]["text"], "Bus hint");
    assert_eq!(detail["translations"][0]["text"], "Bus translation");
    assert_eq!(detail["translations"][0]["language_id"], russian["id"]);
}

#[tokio::test]
async fn test_add_word_with_foreign_language_rejected() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    let other = sign_up(&app, "usrnm2").await;
    let english = create_language(&app, &token, "English").await;
    let foreign = create_language(&app, &other, "German").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/words",
            Some(&token),
            Some(json!({
                "word": "Bus",
                "word_language": english["id"],
                "description": "A vehicle",
                "hint": "Big",
                "translation": "Bus",
                "translation_language": foreign["id"],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Nothing was written
    let (_, words) = send(&app, json_request("GET", "/api/words", Some(&token), None)).await;
    assert_eq!(words["total_items"], 0);
}

#[tokio::test]
async fn test_edit_word_updates_hint_and_translation() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "English").await;
    let russian = create_language(&app, &token, "Russian").await;
    let german = create_language(&app, &token, "German").await;
    let detail = create_word(&app, &token, "Bus", &english, &russian).await;
    let uri = format!("/api/words/{}", detail["word"]["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({
                "word": "Coach",
                "word_language": english["id"],
                "description": "Long distance bus",
                "hint": "Intercity",
                "translation": "Reisebus",
                "translation_language": german["id"],
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"]["text"], "Coach");
    assert_eq!(body["word"]["description"], "Long distance bus");
    assert_eq!(body["hints"].as_array().unwrap().len(), 1);
    assert_eq!(body["hints"][0]["text"], "Intercity");
    assert_eq!(body["translations"][0]["text"], "Reisebus");
    assert_eq!(body["translations"][0]["language_id"], german["id"]);
}

#[tokio::test]
async fn test_other_users_word_forbidden() {
    let app = setup_app().await;
    let owner = sign_up(&app, "usrnm").await;
    let intruder = sign_up(&app, "usrnm2").await;
    let english = create_language(&app, &owner, "English").await;
    let detail = create_word(&app, &owner, "Bus", &english, &english).await;
    let uri = format!("/api/words/{}", detail["word"]["id"].as_str().unwrap());

    let (status, body) = send(&app, json_request("GET", &uri, Some(&intruder), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&intruder), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_word() {
    let app = setup_app().await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "English").await;
    let detail = create_word(&app, &token, "Bus", &english, &english).await;
    let uri = format!("/api/words/{}", detail["word"]["id"].as_str().unwrap());

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing and pagination
// =============================================================================

#[tokio::test]
async fn test_word_pagination_clamps_pages() {
    let app = setup_app_with(DictionarySettings {
        page_size: 2,
        ..DictionarySettings::default()
    })
    .await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "English").await;
    for word in ["One", "Two", "Three", "Four", "Five"] {
        create_word(&app, &token, word, &english, &english).await;
    }

    let (status, body) = send(&app, json_request("GET", "/api/words", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 2);
    assert_eq!(body["total_items"], 5);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["has_next"], true);
    assert_eq!(body["has_previous"], false);
    // Newest first
    assert_eq!(body["items"][0]["text"], "Five");
    assert_eq!(body["items"][1]["text"], "Four");

    let (_, body) = send(&app, json_request("GET", "/api/words?page=99", Some(&token), None)).await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["text"], "One");
    assert_eq!(body["has_next"], false);

    let (_, body) = send(&app, json_request("GET", "/api/words?page=abc", Some(&token), None)).await;
    assert_eq!(body["page"], 1);

    let (_, body) = send(&app, json_request("GET", "/api/words?page=-3", Some(&token), None)).await;
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn test_language_list_scoped_to_user() {
    let app = setup_app().await;
    let token1 = sign_up(&app, "usrnm").await;
    let token2 = sign_up(&app, "usrnm2").await;
    create_language(&app, &token1, "English").await;
    create_language(&app, &token1, "Russian").await;
    create_language(&app, &token2, "German").await;

    let (status, body) = send(&app, json_request("GET", "/api/languages", Some(&token1), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 2);
    assert_eq!(body["items"][0]["name"], "Russian");
    assert_eq!(body["items"][1]["name"], "English");
}

#[tokio::test]
async fn test_dictionary_index_limits_recent_words() {
    let app = setup_app_with(DictionarySettings {
        recent_word_count: 2,
        ..DictionarySettings::default()
    })
    .await;
    let token = sign_up(&app, "usrnm").await;
    let english = create_language(&app, &token, "English").await;
    let russian = create_language(&app, &token, "Russian").await;
    for word in ["One", "Two", "Three"] {
        create_word(&app, &token, word, &english, &russian).await;
    }

    let (status, body) = send(&app, json_request("GET", "/api/dictionary", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);

    let recent: Vec<&str> = body["recent_words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["text"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["Three", "Two"]);
    assert_eq!(body["languages"].as_array().unwrap().len(), 2);
    assert_eq!(body["languages"][0]["name"], "Russian");
}
