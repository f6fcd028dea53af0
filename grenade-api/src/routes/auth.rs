/// Authentication endpoints
///
/// Passwordless sign-in:
///
/// - `POST /v1/auth/magic-link` - Email a single-use login link
/// - `POST /v1/auth/verify` - Redeem the link for tokens
/// - `POST /v1/auth/refresh` - Refresh access token
/// - `GET  /v1/auth/session` - Current identity and workspace
/// - `POST /v1/auth/sign-out` - End the session

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Duration;
use grenade_shared::auth::{jwt, login, middleware::AuthContext};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Magic link request
#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Verify request
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Token from the login link
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Signed-in session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub workspace_id: Uuid,

    /// Access token (24h)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Refresh token (30d)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Refresh token request
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Send a login link
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/magic-link
/// Content-Type: application/json
///
/// { "email": "creator@example.com" }
/// ```
///
/// Responds `202 Accepted` with a message to check email.
///
/// # Errors
///
/// - `400 Bad Request`: Blank or malformed email
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(req): Json<MagicLinkRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let ttl = Duration::minutes(state.config.auth.magic_link_ttl_minutes);

    login::request_link(
        state.store.as_ref(),
        state.mailer.as_ref(),
        &req.email,
        ttl,
        &state.config.auth.app_base_url,
    )
    .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "Check your email for the login link.".to_string(),
        }),
    ))
}

/// Redeem a login link
///
/// # Response
///
/// ```json
/// {
///   "user_id": "uuid",
///   "email": "creator@example.com",
///   "workspace_id": "uuid",
///   "access_token": "eyJ...",
///   "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown, expired or already used link
/// - `422 Unprocessable Entity`: Empty token
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let session = login::redeem_link(state.store.as_ref(), req.token.trim(), state.jwt_secret()).await?;

    Ok(Json(SessionResponse {
        user_id: session.identity.id,
        email: session.identity.email,
        workspace_id: session.workspace_id,
        access_token: Some(session.tokens.access_token),
        refresh_token: Some(session.tokens.refresh_token),
    }))
}

/// Refresh access token
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or expired refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    req.validate()?;

    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Current session, from the access token
pub async fn session(Extension(auth): Extension<AuthContext>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: auth.user_id,
        email: auth.email,
        workspace_id: auth.workspace_id,
        access_token: None,
        refresh_token: None,
    })
}

/// Sign out
///
/// Tokens are stateless; the client discards them. Responds `204 No Content`.
pub async fn sign_out(Extension(auth): Extension<AuthContext>) -> StatusCode {
    tracing::info!(user_id = %auth.user_id, "Signed out");
    StatusCode::NO_CONTENT
}
