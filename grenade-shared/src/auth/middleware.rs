/// Request authentication primitives for Axum
///
/// The API's auth layer pulls the bearer credential out with
/// [`bearer_token`], validates it as an access token and inserts an
/// [`AuthContext`] into the request extensions. Handlers behind the layer
/// read it with `Extension<AuthContext>`.
///
/// # Example
///
/// ```
/// use axum::{body::Body, extract::Request, http::header};
/// use grenade_shared::auth::middleware::bearer_token;
///
/// let req: Request = Request::builder()
///     .header(header::AUTHORIZATION, "Bearer eyJ...")
///     .body(Body::empty())
///     .unwrap();
/// assert_eq!(bearer_token(&req).unwrap(), "eyJ...");
/// ```

use axum::{extract::Request, http::header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;
use crate::session::Identity;

/// Authenticated caller, added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,

    /// Workspace every item operation is scoped to
    pub workspace_id: Uuid,

    pub email: Option<String>,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            workspace_id: claims.workspace_id,
            email: claims.email.clone(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            email: self.email.clone(),
        }
    }
}

/// Bearer extraction errors
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    InvalidFormat(String),
}

/// Pulls the bearer token out of a request
pub fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;
    use axum::body::Body;

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Some("maya@example.com".to_string()),
            TokenType::Access,
        );

        let context = AuthContext::from_claims(&claims);
        assert_eq!(context.user_id, claims.sub);
        assert_eq!(context.workspace_id, claims.workspace_id);
        assert_eq!(context.identity().label(), "maya@example.com");
    }

    #[test]
    fn test_bearer_token() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req).unwrap(), "abc");

        let req = Request::builder()
            .header(header::AUTHORIZATION, "Basic abc")
            .body(Body::empty())
            .unwrap();
        assert!(matches!(bearer_token(&req), Err(AuthError::InvalidFormat(_))));

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&req), Err(AuthError::MissingCredentials));
    }
}
