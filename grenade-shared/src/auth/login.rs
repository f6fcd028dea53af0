/// Passwordless login flow
///
/// 1. [`request_link`] issues a single-use token, stores its hash and mails
///    the login URL.
/// 2. [`redeem_link`] consumes the token, finds or creates the identity,
///    provisions its workspace and returns a fresh token pair.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use grenade_shared::auth::login::{redeem_link, request_link};
/// use grenade_shared::auth::mailer::RecordingMailer;
/// use grenade_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), grenade_shared::auth::login::LoginError> {
/// let store = MemoryStore::new();
/// let mailer = RecordingMailer::new();
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// request_link(&store, &mailer, "creator@example.com", Duration::minutes(15), "http://localhost:3000").await?;
/// let token = mailer.last_for("creator@example.com").unwrap().token().unwrap().to_string();
///
/// let session = redeem_link(&store, &token, secret).await?;
/// assert_eq!(session.identity.email.as_deref(), Some("creator@example.com"));
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::jwt::{issue_token_pair, JwtError, TokenPair};
use super::magic_link::{hash_link_token, issue_link, login_url, validate_link_token_format};
use super::mailer::{LinkMailer, MailerError};
use crate::models::user::normalize_email;
use crate::provision::ensure_workspace;
use crate::session::Identity;
use crate::store::{ContentStore, StoreError};

/// Login error types
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Email was blank or not an address
    #[error("Invalid email address")]
    InvalidEmail,

    /// Token malformed, unknown, expired or already used
    #[error("Invalid or expired login link")]
    InvalidLink,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mailer(#[from] MailerError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

/// A signed-in identity with its workspace and tokens
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub identity: Identity,
    pub workspace_id: Uuid,
    pub tokens: TokenPair,
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Issues, stores and mails a login link
pub async fn request_link<S, M>(
    store: &S,
    mailer: &M,
    email: &str,
    ttl: Duration,
    base_url: &str,
) -> Result<(), LoginError>
where
    S: ContentStore + ?Sized,
    M: LinkMailer + ?Sized,
{
    let email = normalize_email(email);
    if !looks_like_email(&email) {
        return Err(LoginError::InvalidEmail);
    }

    let issued = issue_link(&email, ttl, Utc::now());
    store.create_magic_link(issued.record).await?;
    mailer
        .send_link(&email, &login_url(base_url, &issued.token))
        .await?;

    info!(%email, "Sent login link");
    Ok(())
}

/// Redeems a login token
///
/// # Errors
///
/// [`LoginError::InvalidLink`] for any token that can't be redeemed; the
/// caller can't tell a typo from an expired or reused link.
pub async fn redeem_link<S>(store: &S, token: &str, secret: &str) -> Result<LoginSession, LoginError>
where
    S: ContentStore + ?Sized,
{
    if !validate_link_token_format(token) {
        return Err(LoginError::InvalidLink);
    }

    let link = store
        .consume_magic_link(&hash_link_token(token))
        .await?
        .ok_or_else(|| {
            warn!("Rejected login link");
            LoginError::InvalidLink
        })?;

    let user = store.find_or_create_user(&link.email).await?;
    store.touch_last_login(user.id).await?;

    let identity = user.identity();
    let workspace_id = ensure_workspace(store, identity.id, identity.label()).await?;
    let tokens = issue_token_pair(&identity, workspace_id, secret)?;

    info!(user_id = %identity.id, %workspace_id, "Signed in");
    Ok(LoginSession {
        identity,
        workspace_id,
        tokens,
    })
}
