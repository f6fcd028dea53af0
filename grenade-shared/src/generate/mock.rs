/// Mock generator for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerateError, TextGenerator};

enum Reply {
    Text(String),
    Fail(Option<String>),
}

/// Generator with a canned reply.
pub struct MockGenerator {
    reply: Reply,
    call_count: AtomicU32,
    last_prompt: Mutex<Option<String>>,
}

impl MockGenerator {
    /// Always returns `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::from_reply(Reply::Text(text.into()))
    }

    /// Always fails with an upstream error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_reply(Reply::Fail(Some(message.into())))
    }

    /// Always fails without a message.
    pub fn failing_silently() -> Self {
        Self::from_reply(Reply::Fail(None))
    }

    fn from_reply(reply: Reply) -> Self {
        Self {
            reply,
            call_count: AtomicU32::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of generate calls so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|prompt| prompt.clone())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::with_response("Mock suggestion")
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn id(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(Some(message)) => Err(GenerateError::Upstream(message.clone())),
            Reply::Fail(None) => Err(GenerateError::Failed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls() {
        let mock = MockGenerator::with_response("a\nb");
        assert_eq!(mock.generate("first").await.unwrap(), "a\nb");
        mock.generate("second").await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.last_prompt().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_failures() {
        let err = MockGenerator::failing("quota exceeded").generate("p").await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");

        let err = MockGenerator::failing_silently().generate("p").await.unwrap_err();
        assert_eq!(err.to_string(), "AI error");
    }
}
