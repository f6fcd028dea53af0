/// OpenAI Responses API generator.
///
/// Sends the prompt as a single `input` string to `POST {base_url}/responses`
/// and reads the text back from `output_text`, falling back to the first
/// content block of the first output item.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GenerateError, TextGenerator};

/// Default API base
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-backed generator.
pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiGenerator {
    /// Create a generator.
    ///
    /// Without an API key every call fails with [`GenerateError::NotConfigured`].
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GenerateError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
            model: model.into(),
        })
    }

    /// Create a generator for the public API with the default model.
    pub fn openai(api_key: impl Into<String>) -> Result<Self, GenerateError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL, Some(api_key.into()))
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    fn into_text(self) -> String {
        if let Some(text) = self.output_text.filter(|t| !t.is_empty()) {
            return text;
        }
        self.output
            .into_iter()
            .next()
            .and_then(|item| item.content.into_iter().next())
            .and_then(|content| content.text)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_ref().ok_or(GenerateError::NotConfigured)?;

        let body = ResponsesRequest {
            model: &self.model,
            input: prompt,
        };

        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorReply>(&text)
                .ok()
                .and_then(|reply| reply.error.message)
                .filter(|m| !m.is_empty());

            warn!(%status, model = %self.model, "Generation request rejected");
            return Err(match message {
                Some(message) => GenerateError::Upstream(message),
                None => GenerateError::Failed,
            });
        }

        let reply: ResponsesReply = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        let text = reply.into_text();
        debug!(model = %self.model, chars = text.len(), "Generation complete");
        Ok(text)
    }
}
