mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{ALICE, BOB};
use scoped_shortener::domain::entities::Redirect;
use scoped_shortener::domain::repositories::RedirectRepository;
use scoped_shortener::infrastructure::memory::InMemoryRedirectRepository;
use serde_json::{Value, json};
use std::sync::Arc;

#[tokio::test]
async fn test_create_redirect() {
    let server = common::create_multi_tenant_server().await;

    let response = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .add_header("x-forwarded-email", "alice@example.com")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    let short = body["short"].as_str().unwrap();
    assert_eq!(short.len(), 6);
    assert!(short.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["short_url"], format!("https://s.example.com/{short}"));
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_redirect_is_idempotent() {
    let server = common::create_multi_tenant_server().await;

    let first: Value = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .json(&json!({ "url": "https://example.com/again" }))
        .await
        .json();

    let second: Value = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .json(&json!({ "url": "https://example.com/again" }))
        .await
        .json();

    assert_eq!(first["short"], second["short"]);
    assert_eq!(first["created_at"], second["created_at"]);

    let list: Value = server
        .get("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .await
        .json();
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_same_url_differs_per_owner() {
    let server = common::create_multi_tenant_server().await;

    let alice: Value = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .json(&json!({ "url": "https://example.com/shared" }))
        .await
        .json();

    let bob: Value = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", BOB)
        .json(&json!({ "url": "https://example.com/shared" }))
        .await
        .json();

    assert_ne!(alice["short"], bob["short"]);
}

#[tokio::test]
async fn test_create_redirect_invalid_url() {
    let server = common::create_multi_tenant_server().await;

    let response = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_redirect_malformed_body() {
    let server = common::create_multi_tenant_server().await;

    let response = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .json(&json!({ "nope": 1 }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "Invalid request body");
}

#[tokio::test]
async fn test_create_redirect_without_json_content_type() {
    let server = common::create_multi_tenant_server().await;

    let response = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .text(r#"{"url":"https://example.com"}"#)
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_redirect_code_collision_is_conflict() {
    // "0J983h" is the code owner "me" derives for https://example.com.
    let repository = Arc::new(InMemoryRedirectRepository::new());
    repository
        .save(&Redirect::new(
            "0J983h",
            "https://other.example",
            "someone-else",
            Utc::now(),
        ))
        .await
        .unwrap();

    let server = common::create_single_tenant_server("me", repository.clone());

    let response = server
        .post("/api/redirects")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
    assert_eq!(body["error"]["details"]["short"], "0J983h");

    let stored = repository.find_by_short("0J983h").await.unwrap().unwrap();
    assert_eq!(stored.url, "https://other.example");
    assert_eq!(stored.owner_id, "someone-else");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let server = common::create_multi_tenant_server().await;

    server
        .get("/api/redirects")
        .await
        .assert_status_unauthorized();

    server
        .post("/api/redirects")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status_unauthorized();

    server
        .get("/api/redirects")
        .add_header("x-forwarded-user", "   ")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_list_redirects_is_owner_scoped() {
    let server = common::create_multi_tenant_server().await;

    for url in ["https://example.com/1", "https://example.com/2"] {
        server
            .post("/api/redirects")
            .add_header("x-forwarded-user", ALICE)
            .json(&json!({ "url": url }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    server
        .post("/api/redirects")
        .add_header("x-forwarded-user", BOB)
        .json(&json!({ "url": "https://example.com/3" }))
        .await
        .assert_status(StatusCode::CREATED);

    let alice: Value = server
        .get("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .await
        .json();
    assert_eq!(alice["total"], 2);
    let urls: Vec<&str> = alice["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["url"].as_str().unwrap())
        .collect();
    assert!(urls.contains(&"https://example.com/1"));
    assert!(urls.contains(&"https://example.com/2"));

    let bob: Value = server
        .get("/api/redirects")
        .add_header("x-forwarded-user", BOB)
        .await
        .json();
    assert_eq!(bob["total"], 1);
    assert_eq!(bob["items"][0]["url"], "https://example.com/3");
}

#[tokio::test]
async fn test_list_redirects_empty() {
    let server = common::create_multi_tenant_server().await;

    let response = server
        .get("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "total": 0, "items": [] }));
}

#[tokio::test]
async fn test_get_and_delete_are_owner_scoped() {
    let server = common::create_multi_tenant_server().await;

    let created: Value = server
        .post("/api/redirects")
        .add_header("x-forwarded-user", ALICE)
        .json(&json!({ "url": "https://example.com/private" }))
        .await
        .json();
    let short = created["short"].as_str().unwrap();
    let path = format!("/api/redirects/{short}");

    // Another owner sees the same 404 as for an unknown code.
    server
        .get(&path)
        .add_header("x-forwarded-user", BOB)
        .await
        .assert_status_not_found();
    server
        .delete(&path)
        .add_header("x-forwarded-user", BOB)
        .await
        .assert_status_not_found();

    let fetched: Value = server
        .get(&path)
        .add_header("x-forwarded-user", ALICE)
        .await
        .json();
    assert_eq!(fetched["url"], "https://example.com/private");

    server
        .delete(&path)
        .add_header("x-forwarded-user", ALICE)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&path)
        .add_header("x-forwarded-user", ALICE)
        .await
        .assert_status_not_found();
    server
        .delete(&path)
        .add_header("x-forwarded-user", ALICE)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_get_malformed_code_is_not_found() {
    let server = common::create_multi_tenant_server().await;

    server
        .get("/api/redirects/abc-12")
        .add_header("x-forwarded-user", ALICE)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_single_tenant_mode() {
    let mut config = common::memory_config();
    config.single_tenant_user = Some("me".to_string());
    let server = common::create_test_server(config).await;

    let created = server
        .post("/api/redirects")
        .json(&json!({ "url": "https://example.com/solo" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let body: Value = created.json();
    // Codes are derived from the configured owner id.
    assert_eq!(body["short"], "2nbZWn");

    // Forwarded identity headers are ignored.
    let list: Value = server
        .get("/api/redirects")
        .add_header("x-forwarded-user", BOB)
        .await
        .json();
    assert_eq!(list["total"], 1);
}
