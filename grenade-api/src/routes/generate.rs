/// AI suggestion endpoint
///
/// ```text
/// POST /api/generate
/// Content-Type: application/json
///
/// { "mode": "hooks", "title": "Budget tips", "contentType": "TikTok" }
/// ```
///
/// Success is `{"items": [...]}`. Failures use a bare `{"error": "..."}`
/// body: 400 for a missing title, 500 for everything else, carrying the
/// provider's message when there is one.

use crate::app::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use grenade_shared::generate::{generate_suggestions, GenerateError, GenerateRequest};
use serde_json::{json, Value};

pub async fn generate(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let request: GenerateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable generate request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    match generate_suggestions(state.generator.as_ref(), &request).await {
        Ok(items) => (StatusCode::OK, Json(json!({ "items": items }))),
        Err(GenerateError::MissingTitle) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": GenerateError::MissingTitle.to_string() })),
        ),
        Err(e) => {
            tracing::error!(error = %e, generator = state.generator.id(), "Generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
