// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Seha pipeline.
//!
//! Each test creates an isolated TestHarness with a mock provider and its own
//! store. Tests are independent and order-insensitive.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use seha_core::{ConversationStore, Role, UserId};
use seha_gateway::{CookieSettings, GatewayState, build_router};
use seha_test_utils::TestHarness;
use tower::ServiceExt;

// ---- Pipeline over SQLite ----

#[tokio::test]
async fn test_chat_pipeline_persists_turns_and_records() {
    let harness = TestHarness::builder()
        .with_sqlite()
        .with_mock_responses(vec![
            "Hello, I'm Seha.\n#STATE {\"comfort\": 0.5, \"trust\": 0.4, \"autonomy\": 0.3}".into(),
            "No annotation this time.".into(),
        ])
        .build()
        .await
        .unwrap();
    let ctx = harness.context_for("alice").await.unwrap();

    let first = harness.send_message(&ctx, "Hi there").await.unwrap();
    assert!(first.emotion_state.is_some());
    let second = harness.send_message(&ctx, "How are you?").await.unwrap();
    assert!(second.emotion_state.is_none());

    let state = harness.store.load(&ctx.user).await.unwrap();
    assert_eq!(state.turns.len(), 2);
    assert_eq!(state.turns[0].user_text, "Hi there");
    assert!(state.turns[0].assistant_text.contains("#STATE"));
    assert_eq!(state.turns[1].assistant_text, "No annotation this time.");
    assert_eq!(state.annotations.len(), 1);
    assert_eq!(state.annotations[0].emotions["autonomy"], serde_json::json!(0.3));
}

#[tokio::test]
async fn test_window_is_bounded_after_fifteen_turns() {
    let harness = TestHarness::builder()
        .with_sqlite()
        .build()
        .await
        .unwrap();
    let ctx = harness.context_for("bob").await.unwrap();

    for i in 0..16 {
        harness
            .send_message(&ctx, &format!("turn {i}"))
            .await
            .unwrap();
    }

    let requests = harness.mock_provider.requests().await;
    // The 16th request sees 15 stored turns: 10 pairs + system + new message.
    let last = requests.last().unwrap();
    assert_eq!(last.messages.len(), 22);
    assert_eq!(last.messages[0].role, Role::System);
    assert_eq!(last.messages[1].role, Role::User);
    assert_eq!(last.messages[1].content, "turn 5");
    assert_eq!(last.messages[2].role, Role::Assistant);
    assert_eq!(last.messages[21].content, "turn 15");

    let state = harness.store.load(&ctx.user).await.unwrap();
    assert_eq!(state.turns.len(), 16);
}

#[tokio::test]
async fn test_upstream_failure_mutates_nothing() {
    let harness = TestHarness::builder()
        .with_sqlite()
        .with_mock_responses(vec!["first reply".into()])
        .build()
        .await
        .unwrap();
    let ctx = harness.context_for("carol").await.unwrap();
    harness.send_message(&ctx, "one").await.unwrap();
    harness.mock_provider.push_error("HTTP request failed: timed out").await;

    let before = harness.store.load(&ctx.user).await.unwrap();
    let err = harness.send_message(&ctx, "two").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP request failed: timed out");
    assert_eq!(harness.store.load(&ctx.user).await.unwrap(), before);
}

// ---- HTTP flow ----

#[tokio::test]
async fn test_http_login_chat_research_data_flow() {
    let harness = TestHarness::builder()
        .with_sqlite()
        .with_mock_responses(vec!["Welcome back.\n#STATE {\"comfort\": 0.9}".into()])
        .build()
        .await
        .unwrap();
    let app = build_router(GatewayState::new(
        harness.service.clone(),
        CookieSettings {
            name: "seha_session".into(),
            secure: false,
        },
    ));

    let login = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username": "dana"}"#))
        .unwrap();
    let response = app.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let chat = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from(r#"{"message": "I'm back"}"#))
        .unwrap();
    let response = app.clone().oneshot(chat).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["emotion_state"]["comfort"], 0.9);

    let research = Request::builder()
        .uri("/research_data")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(research).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let records: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);

    let stored = harness.store.load(&UserId::from("dana")).await.unwrap();
    assert_eq!(stored.turns.len(), 1);
}
