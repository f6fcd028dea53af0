#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// Every context runs the full router over an in-memory store, a canned
/// generator and a mailer that keeps links in memory, so no external
/// services are needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use grenade_api::app::{build_router, AppState};
use grenade_api::config::Config;
use grenade_shared::auth::mailer::RecordingMailer;
use grenade_shared::generate::MockGenerator;
use grenade_shared::store::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub generator: Arc<MockGenerator>,
    pub config: Config,
}

/// A signed-in test user
pub struct SignedIn {
    pub user_id: String,
    pub workspace_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl SignedIn {
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_generator(MockGenerator::default())
    }

    pub fn with_generator(generator: MockGenerator) -> Self {
        let config = Config::for_tests();
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let generator = Arc::new(generator);

        let state = AppState::new(
            store.clone(),
            generator.clone(),
            mailer.clone(),
            config.clone(),
        );

        Self {
            app: build_router(state),
            store,
            mailer,
            generator,
            config,
        }
    }

    /// Sends a request and returns status plus parsed JSON body (Null when empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("Non-JSON body: {}", String::from_utf8_lossy(&bytes))
            })
        };

        (status, json)
    }

    /// Requests a magic link for `email` and returns the emailed token
    pub async fn request_link(&self, email: &str) -> String {
        let (status, _) = self
            .send(
                "POST",
                "/v1/auth/magic-link",
                None,
                Some(serde_json::json!({ "email": email })),
            )
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);

        self.mailer
            .last_for(&email.trim().to_lowercase())
            .and_then(|link| link.token().map(str::to_string))
            .expect("login link should have been sent")
    }

    /// Full magic-link sign-in
    pub async fn sign_in(&self, email: &str) -> SignedIn {
        let token = self.request_link(email).await;

        let (status, body) = self
            .send(
                "POST",
                "/v1/auth/verify",
                None,
                Some(serde_json::json!({ "token": token })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "verify failed: {}", body);

        SignedIn {
            user_id: body["user_id"].as_str().unwrap().to_string(),
            workspace_id: body["workspace_id"].as_str().unwrap().to_string(),
            access_token: body["access_token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}
