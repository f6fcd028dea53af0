/// Session context
///
/// Holds the current identity and publishes auth-state changes. A context is
/// created once at startup, handed to whatever needs identity, and emptied by
/// [`SessionContext::sign_out`]. Clones share the same underlying state.
///
/// # Example
///
/// ```
/// use grenade_shared::session::{AuthState, Identity, SessionContext};
/// use tokio_stream::StreamExt;
/// use uuid::Uuid;
///
/// # async fn example() {
/// let session = SessionContext::new();
/// let mut changes = session.subscribe();
///
/// let identity = Identity { id: Uuid::new_v4(), email: Some("creator@example.com".into()) };
/// session.sign_in(identity.clone());
///
/// assert_eq!(changes.next().await, Some(AuthState::SignedIn(identity)));
/// # }
/// ```

use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};
use tracing::info;
use uuid::Uuid;

/// Label used when an identity has no email
pub const FALLBACK_LABEL: &str = "Creator";

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque identity id
    pub id: Uuid,

    /// Email, when the provider supplied one
    pub email: Option<String>,
}

impl Identity {
    /// Display label used to name the identity's workspace
    pub fn label(&self) -> &str {
        self.email.as_deref().unwrap_or(FALLBACK_LABEL)
    }
}

/// Auth-state change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedIn(Identity),
    SignedOut,
}

impl From<Option<Identity>> for AuthState {
    fn from(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => AuthState::SignedIn(identity),
            None => AuthState::SignedOut,
        }
    }
}

/// Stream of auth-state changes
pub type AuthStateStream = Pin<Box<dyn Stream<Item = AuthState> + Send>>;

/// Explicit holder of the current identity
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<watch::Sender<Option<Identity>>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// Creates a signed-out context
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            current: Arc::new(tx),
        }
    }

    /// Creates a context that starts signed in (a restored session)
    pub fn with_identity(identity: Identity) -> Self {
        let (tx, _rx) = watch::channel(Some(identity));
        Self {
            current: Arc::new(tx),
        }
    }

    /// Current identity, if signed in
    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    /// Whether an identity is present
    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Replaces the current identity and notifies subscribers
    pub fn sign_in(&self, identity: Identity) {
        info!(user_id = %identity.id, "Session signed in");
        self.current.send_replace(Some(identity));
    }

    /// Clears the current identity and notifies subscribers
    pub fn sign_out(&self) {
        if let Some(previous) = self.current.send_replace(None) {
            info!(user_id = %previous.id, "Session signed out");
        }
    }

    /// Subscribes to future auth-state changes
    ///
    /// The stream yields only changes made after the call, not the current state.
    pub fn subscribe(&self) -> AuthStateStream {
        let changes = WatchStream::from_changes(self.current.subscribe());
        Box::pin(changes.map(AuthState::from))
    }
}
