//! Posts CRUD, auth, and CORS over a live HTTP server.

use reqwest::StatusCode;
use serde_json::{json, Value};

use postgate::config::ServiceConfig;

mod common;

fn open_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.rate_limit.limit = 10_000;
    config
}

#[tokio::test]
async fn test_post_crud_flow() {
    let config = open_config();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(server.url("/posts"))
        .json(&json!({
            "title": "Hello",
            "excerpt": "A greeting",
            "body": "Hello from the integration test."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_u64().unwrap();
    assert_eq!(created["title"], "Hello");
    assert!(created["updated_at"].is_null());

    // Read
    let resp = client
        .get(server.url(&format!("/posts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Update
    let resp = client
        .put(server.url(&format!("/posts/{id}")))
        .json(&json!({"title": "Hello again", "body": "Updated body."}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "Hello again");
    assert!(!updated["updated_at"].is_null());

    // List
    let resp = client.get(server.url("/posts")).send().await.unwrap();
    let posts: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(posts.len(), 1);

    // Delete
    let resp = client
        .delete(server.url(&format!("/posts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(server.url(&format!("/posts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_title_and_body() {
    let config = open_config();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;

    let resp = reqwest::Client::new()
        .post(server.url("/posts"))
        .json(&json!({"excerpt": "no title or body"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_fields_are_sanitized() {
    let config = open_config();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/posts"))
        .json(&json!({
            "title": "tick`tick`tick",
            "body": "under_score stays? no"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["title"], "tickticktick");
    assert_eq!(created["body"], "underscore stays? no");
}

#[tokio::test]
async fn test_bearer_auth_is_enforced() {
    let mut config = open_config();
    config.auth.enabled = true;
    config.auth.bearer_token = "test-secret".to_string();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/posts")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.text().await.unwrap(), "Authorization header is missing");

    let resp = client
        .get(server.url("/posts"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.text().await.unwrap(), "Invalid bearer token");

    let resp = client
        .get(server.url("/posts"))
        .header("Authorization", "Bearer test-secret")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_and_security_headers_present() {
    let config = open_config();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/")).send().await.unwrap();
    let headers = resp.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "deny");
    assert_eq!(headers["content-security-policy"], "default-src 'self'");
}

#[tokio::test]
async fn test_preflight_short_circuits_before_auth() {
    let mut config = open_config();
    config.auth.enabled = true;
    config.auth.bearer_token = "test-secret".to_string();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;

    // No Authorization header, yet preflight succeeds.
    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/posts"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let config = open_config();
    let limiter = common::limiter_from(&config);
    let server = common::spawn_server(config, limiter).await;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/")).send().await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = client
        .get(server.url("/"))
        .header("x-request-id", "caller-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "caller-chosen");
}
