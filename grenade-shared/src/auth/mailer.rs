/// Login-link delivery.
///
/// Delivery is behind [`LinkMailer`] so the auth flow doesn't care whether a
/// link goes out through a mail provider, the log, or a test recorder.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

/// Delivery failure
#[derive(Debug, thiserror::Error)]
#[error("Failed to send login link: {0}")]
pub struct MailerError(pub String);

/// Sends login links to addresses.
#[async_trait]
pub trait LinkMailer: Send + Sync {
    /// Delivers `url` to `email`.
    async fn send_link(&self, email: &str, url: &str) -> Result<(), MailerError>;
}

/// Writes links to the log instead of sending them.
///
/// For local development: the link shows up in the server output.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl LinkMailer for LogMailer {
    async fn send_link(&self, email: &str, url: &str) -> Result<(), MailerError> {
        info!(%email, %url, "Login link issued");
        Ok(())
    }
}

/// A delivered link, as captured by [`RecordingMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentLink {
    pub email: String,
    pub url: String,
}

impl SentLink {
    /// Token from the link's query string.
    pub fn token(&self) -> Option<&str> {
        self.url.split_once("token=").map(|(_, token)| token)
    }
}

/// Keeps every link in memory for tests.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentLink>>,
    fail: Mutex<Option<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every link sent so far, oldest first.
    pub fn sent(&self) -> Vec<SentLink> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent link sent to `email`.
    pub fn last_for(&self, email: &str) -> Option<SentLink> {
        self.sent()
            .into_iter()
            .rev()
            .find(|link| link.email == email)
    }

    /// Makes subsequent sends fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut fail) = self.fail.lock() {
            *fail = Some(message.into());
        }
    }
}

#[async_trait]
impl LinkMailer for RecordingMailer {
    async fn send_link(&self, email: &str, url: &str) -> Result<(), MailerError> {
        if let Some(message) = self.fail.lock().ok().and_then(|fail| fail.clone()) {
            return Err(MailerError(message));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentLink {
                email: email.to_string(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}
