//! Integration tests for the chat relay endpoint.
//!
//! These tests require:
//! - The site running (cargo run -p iq-geospatial-site)
//! - `CHAT_RELAY_TOKEN` set to the server's configured token
//! - A reachable completion API for the happy-path test
//!
//! Run with: cargo test -p iq-geospatial-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use iq_geospatial_integration_tests::{client, relay_token, site_base_url};

#[tokio::test]
#[ignore = "Requires a running site server"]
async fn test_relay_rejects_missing_bearer_token() {
    let client = client();

    let resp = client
        .post(format!("{}/api/chat", site_base_url()))
        .json(&json!({"messages": [{"role": "user", "content": "hello"}]}))
        .send()
        .await
        .expect("Failed to post chat message");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires a running site server"]
async fn test_relay_rejects_empty_history() {
    let client = client();
    let token = relay_token().expect("CHAT_RELAY_TOKEN not set");

    let resp = client
        .post(format!("{}/api/chat", site_base_url()))
        .bearer_auth(token)
        .json(&json!({"messages": []}))
        .send()
        .await
        .expect("Failed to post chat message");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires a running site server and a reachable completion API"]
async fn test_relay_returns_reply_for_long_history() {
    let client = client();
    let token = relay_token().expect("CHAT_RELAY_TOKEN not set");

    // 12 prior turns plus a new question; the server forwards only the most
    // recent 8 entries plus its system prompt.
    let mut messages: Vec<Value> = (0..12)
        .map(|i| json!({"role": if i % 2 == 0 { "user" } else { "assistant" }, "content": format!("turn {i}")}))
        .collect();
    messages.push(json!({"role": "user", "content": "What services do you offer?"}));

    let resp = client
        .post(format!("{}/api/chat", site_base_url()))
        .bearer_auth(token)
        .json(&json!({ "messages": messages }))
        .send()
        .await
        .expect("Failed to post chat message");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let reply = body["reply"].as_str().expect("missing reply");
    assert!(!reply.is_empty());
}
