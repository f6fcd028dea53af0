/// Integration tests for the AI suggestion endpoint

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use grenade_shared::generate::MockGenerator;
use serde_json::json;

#[tokio::test]
async fn test_generate_hooks() {
    let ctx = TestContext::with_generator(MockGenerator::with_response(
        "1. Stop scrolling\n- Nobody tells you this\n\n* Here is the trick",
    ));

    let (status, body) = ctx
        .send(
            "POST",
            "/api/generate",
            None,
            Some(json!({ "mode": "hooks", "title": "Budget tips", "contentType": "TikTok" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["items"],
        json!(["Stop scrolling", "Nobody tells you this", "Here is the trick"])
    );

    let prompt = ctx.generator.last_prompt().unwrap();
    assert!(prompt.contains("Budget tips"));
    assert!(prompt.contains("TikTok"));
    assert!(prompt.to_lowercase().contains("hook"));
}

#[tokio::test]
async fn test_generate_defaults_to_angles() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/generate",
            None,
            Some(json!({ "mode": "whatever", "title": "Studio tour" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!(["Mock suggestion"]));

    let prompt = ctx.generator.last_prompt().unwrap();
    assert!(prompt.contains("Studio tour"));
    assert!(prompt.contains("content piece"));
}

#[tokio::test]
async fn test_generate_missing_title() {
    let ctx = TestContext::new();

    for body in [
        json!({ "mode": "hooks" }),
        json!({ "title": "" }),
        json!({ "title": null }),
        json!({ "title": 0 }),
    ] {
        let (status, response) = ctx
            .send("POST", "/api/generate", None, Some(body))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "Missing title" }));
    }

    assert_eq!(ctx.generator.call_count(), 0);
}

#[tokio::test]
async fn test_generate_sends_whitespace_title() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/generate",
            None,
            Some(json!({ "mode": "hooks", "title": "   " })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!(["Mock suggestion"]));
    assert_eq!(ctx.generator.call_count(), 1);
}

#[tokio::test]
async fn test_generate_accepts_numeric_title() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("POST", "/api/generate", None, Some(json!({ "mode": "hooks", "title": 42 })))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!(["Mock suggestion"]));
    assert!(ctx.generator.last_prompt().unwrap().contains("titled \"42\""));
}

#[tokio::test]
async fn test_generate_passes_upstream_message() {
    let ctx = TestContext::with_generator(MockGenerator::failing("Rate limit reached"));

    let (status, body) = ctx
        .send("POST", "/api/generate", None, Some(json!({ "title": "Budget tips" })))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Rate limit reached" }));
}

#[tokio::test]
async fn test_generate_generic_failure() {
    let ctx = TestContext::with_generator(MockGenerator::failing_silently());

    let (status, body) = ctx
        .send("POST", "/api/generate", None, Some(json!({ "title": "Budget tips" })))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "AI error" }));
}

#[tokio::test]
async fn test_generate_unreadable_body() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = ctx.send_request(request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert_eq!(ctx.generator.call_count(), 0);
}

#[tokio::test]
async fn test_generate_empty_reply_yields_no_items() {
    let ctx = TestContext::with_generator(MockGenerator::with_response("  \n\n"));

    let (status, body) = ctx
        .send("POST", "/api/generate", None, Some(json!({ "title": "Budget tips" })))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}
