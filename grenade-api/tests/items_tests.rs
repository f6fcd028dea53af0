/// Integration tests for the workspace content library

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::{json, Value};

fn titles(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_and_list_items() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/items",
            token,
            Some(json!({
                "title": "  Budget tips  ",
                "notes": "three quick wins",
                "content_type": "TikTok",
                "tags": "money,  tips , ,"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total"], 1);

    let item = &body["items"][0];
    assert_eq!(item["title"], "Budget tips");
    assert_eq!(item["content_type"], "TikTok");
    assert_eq!(item["stage"], "Idea");
    assert_eq!(item["tags"], json!(["money", "tips"]));
    assert_eq!(item["workspace_id"], session.workspace_id.as_str());

    let (status, listed) = ctx.send("GET", "/v1/items", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["items"], body["items"]);
}

#[tokio::test]
async fn test_create_defaults_and_tag_list() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/items",
            Some(&session.access_token),
            Some(json!({ "title": "Episode 12", "tags": [" guests ", ""] })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let item = &body["items"][0];
    assert_eq!(item["content_type"], "General");
    assert_eq!(item["stage"], "Idea");
    assert_eq!(item["notes"], "");
    assert_eq!(item["tags"], json!(["guests"]));
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/items",
            Some(&session.access_token),
            Some(json!({ "title": "   ", "notes": "orphan" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing title");

    let (_, listed) = ctx
        .send("GET", "/v1/items", Some(&session.access_token), None)
        .await;
    assert_eq!(listed["total"], 0);
}

#[tokio::test]
async fn test_items_listed_newest_first() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    for title in ["First", "Second", "Third"] {
        ctx.send("POST", "/v1/items", token, Some(json!({ "title": title })))
            .await;
    }

    let (_, body) = ctx.send("GET", "/v1/items", token, None).await;
    assert_eq!(titles(&body), vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_search_filters_but_total_counts_all() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    ctx.send(
        "POST",
        "/v1/items",
        token,
        Some(json!({ "title": "Budget tips", "tags": "money" })),
    )
    .await;
    ctx.send(
        "POST",
        "/v1/items",
        token,
        Some(json!({ "title": "Studio tour", "stage": "Recorded" })),
    )
    .await;

    let (status, body) = ctx.send("GET", "/v1/items?q=MONEY", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Budget tips"]);
    assert_eq!(body["total"], 2);

    let (_, body) = ctx.send("GET", "/v1/items?q=recorded", token, None).await;
    assert_eq!(titles(&body), vec!["Studio tour"]);

    let (_, body) = ctx.send("GET", "/v1/items?q=", token, None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    let (_, body) = ctx
        .send(
            "POST",
            "/v1/items",
            token,
            Some(json!({ "title": "Draft", "notes": "old", "tags": "a,b" })),
        )
        .await;
    let id = body["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/v1/items/{}", id),
            token,
            Some(json!({
                "title": "Final",
                "notes": "new",
                "content_type": "Podcast",
                "stage": "Edited",
                "tags": ""
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let item = &body["items"][0];
    assert_eq!(item["id"], id.as_str());
    assert_eq!(item["title"], "Final");
    assert_eq!(item["notes"], "new");
    assert_eq!(item["content_type"], "Podcast");
    assert_eq!(item["stage"], "Edited");
    assert_eq!(item["tags"], json!([]));
}

#[tokio::test]
async fn test_update_rejects_blank_title() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    let (_, body) = ctx
        .send("POST", "/v1/items", token, Some(json!({ "title": "Keep me" })))
        .await;
    let id = body["items"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = ctx
        .send(
            "PUT",
            &format!("/v1/items/{}", id),
            token,
            Some(json!({ "title": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = ctx.send("GET", "/v1/items", token, None).await;
    assert_eq!(titles(&body), vec!["Keep me"]);
}

#[tokio::test]
async fn test_delete_item() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    let (_, body) = ctx
        .send("POST", "/v1/items", token, Some(json!({ "title": "Gone soon" })))
        .await;
    ctx.send("POST", "/v1/items", token, Some(json!({ "title": "Stays" })))
        .await;
    let id = body["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .send("DELETE", &format!("/v1/items/{}", id), token, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Stays"]);

    let (status, _) = ctx
        .send("DELETE", &format!("/v1/items/{}", id), token, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_workspaces_are_isolated() {
    let ctx = TestContext::new();
    let alice = ctx.sign_in("alice@example.com").await;
    let bob = ctx.sign_in("bob@example.com").await;
    assert_ne!(alice.workspace_id, bob.workspace_id);

    let (_, body) = ctx
        .send(
            "POST",
            "/v1/items",
            Some(&alice.access_token),
            Some(json!({ "title": "Alice only" })),
        )
        .await;
    let id = body["items"][0]["id"].as_str().unwrap().to_string();

    let (_, listed) = ctx.send("GET", "/v1/items", Some(&bob.access_token), None).await;
    assert_eq!(listed["total"], 0);

    let (status, _) = ctx
        .send(
            "PUT",
            &format!("/v1/items/{}", id),
            Some(&bob.access_token),
            Some(json!({ "title": "Hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .send("DELETE", &format!("/v1/items/{}", id), Some(&bob.access_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .send(
            "GET",
            &format!("/v1/items/{}/suggestions", id),
            Some(&bob.access_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = ctx
        .send("GET", "/v1/items", Some(&alice.access_token), None)
        .await;
    assert_eq!(titles(&listed), vec!["Alice only"]);
}

#[tokio::test]
async fn test_store_write_failure_surfaces_message() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    ctx.store.fail_writes_with("row-level security violation");

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/items",
            Some(&session.access_token),
            Some(json!({ "title": "Blocked" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "row-level security violation");
}

#[tokio::test]
async fn test_item_suggestions() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;
    let token = Some(session.access_token.as_str());

    let (_, body) = ctx
        .send(
            "POST",
            "/v1/items",
            token,
            Some(json!({ "title": "Budget tips", "content_type": "Podcast" })),
        )
        .await;
    let id = body["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .send("GET", &format!("/v1/items/{}/suggestions", id), token, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["hook"].as_str().unwrap().contains("Budget tips"));
    let angles = body["angles"].as_array().unwrap();
    assert_eq!(angles.len(), 10);
    assert!(angles
        .iter()
        .all(|angle| angle.as_str().unwrap().contains("Budget tips")));

    let (status, _) = ctx
        .send(
            "GET",
            &format!("/v1/items/{}/suggestions", uuid::Uuid::new_v4()),
            token,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_library_options() {
    let ctx = TestContext::new();
    let session = ctx.sign_in("creator@example.com").await;

    let (status, body) = ctx
        .send("GET", "/v1/library/options", Some(&session.access_token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content_types"][0], "General");
    assert_eq!(body["content_types"].as_array().unwrap().len(), 8);
    assert_eq!(body["stages"][0], "Idea");
    assert_eq!(body["stages"].as_array().unwrap().len(), 7);
}
