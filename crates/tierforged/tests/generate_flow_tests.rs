//! End-to-end tests for the generation endpoint.
//!
//! Drives the router directly with a fake completion client so the quota
//! gate, validation and error mapping are exercised without a network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tierforged::config::Config;
use tierforged::llm::{FakeCompletionClient, LlmError};
use tierforged::routes::{GENERATION_FAILED_MESSAGE, MISSING_TOPIC_MESSAGE, QUOTA_MESSAGE};
use tierforged::server::{router, AppState};

const LABELLED_BLOB: &str = "SUPPORT:\n- task a\nCORE:\n- task b\nCHALLENGE:\n- task c";

fn setup_app(free_requests: u64, llm: FakeCompletionClient) -> (axum::Router, Arc<FakeCompletionClient>) {
    let mut config = Config::default();
    config.server.free_requests = free_requests;

    let llm = Arc::new(llm);
    let state = AppState::new(config, llm.clone());
    (router(Arc::new(state)), llm)
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_returns_raw_blob() {
    let (app, llm) = setup_app(5, FakeCompletionClient::always_ok(LABELLED_BLOB));

    let response = app
        .oneshot(generate_request(
            r#"{"topic":"How does Shakespeare present ambition?","yearGroup":"10"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["tasks"], LABELLED_BLOB);
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_missing_topic_is_400_and_skips_upstream() {
    let (app, llm) = setup_app(5, FakeCompletionClient::always_ok(LABELLED_BLOB));

    let response = app
        .oneshot(generate_request(r#"{"yearGroup":"9"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], MISSING_TOPIC_MESSAGE);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_whitespace_topic_is_400() {
    let (app, llm) = setup_app(5, FakeCompletionClient::always_ok(LABELLED_BLOB));

    let response = app
        .oneshot(generate_request(r#"{"topic":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_quota_locks_after_limit() {
    let (app, llm) = setup_app(3, FakeCompletionClient::always_ok(LABELLED_BLOB));

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(generate_request(r#"{"topic":"war poetry","yearGroup":"8"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(generate_request(r#"{"topic":"war poetry","yearGroup":"8"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = json_body(response).await;
    assert_eq!(json["error"], QUOTA_MESSAGE);
    // The rejected request never reached the upstream adapter.
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn test_invalid_requests_still_consume_quota() {
    // Counting happens before validation, matching the gate contract.
    let (app, llm) = setup_app(2, FakeCompletionClient::always_ok(LABELLED_BLOB));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(generate_request(r#"{"topic":""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .oneshot(generate_request(r#"{"topic":"a valid topic"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_500_with_generic_message() {
    let (app, llm) = setup_app(
        5,
        FakeCompletionClient::always_error(LlmError::Rejected(429)),
    );

    let response = app
        .oneshot(generate_request(r#"{"topic":"Macbeth","yearGroup":"11"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], GENERATION_FAILED_MESSAGE);
    // The underlying cause must not leak into the body.
    assert!(!json["error"].as_str().unwrap().contains("429"));
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_upstream_timeout_maps_to_same_generic_message() {
    let (app, _llm) = setup_app(5, FakeCompletionClient::always_error(LlmError::Timeout(30)));

    let response = app
        .oneshot(generate_request(r#"{"topic":"An Inspector Calls"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], GENERATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_health_endpoint_reports_remaining() {
    let (app, _llm) = setup_app(5, FakeCompletionClient::always_ok(LABELLED_BLOB));

    let _ = app
        .clone()
        .oneshot(generate_request(r#"{"topic":"poetry anthology"}"#))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["requests_remaining"], 4);
}
