/// Suggestion generation
///
/// Two sources of ideas for a content item:
///
/// - Local: [`hooks`] picks one opening line from a per-type template pool and
///   [`angles`] lists ten repurpose angles. No network, no failure modes.
/// - Remote: [`generate_suggestions`] builds a prompt, sends it to a
///   [`TextGenerator`] and splits the reply into one suggestion per line.
///
/// # Example
///
/// ```
/// use grenade_shared::generate::{generate_suggestions, GenerateRequest, MockGenerator};
///
/// # async fn example() -> Result<(), grenade_shared::generate::GenerateError> {
/// let generator = MockGenerator::with_response("1. First hook\n2. Second hook");
/// let request = GenerateRequest {
///     mode: Some("hooks".into()),
///     title: Some("Budget tips".into()),
///     content_type: Some("TikTok".into()),
/// };
///
/// let items = generate_suggestions(&generator, &request).await?;
/// assert_eq!(items, vec!["First hook", "Second hook"]);
/// # Ok(())
/// # }
/// ```

pub mod angles;
pub mod hooks;
pub mod mock;
pub mod openai;
pub mod parse;
pub mod prompt;

pub use angles::repurpose_angles;
pub use hooks::{hook_for, hook_pool, pick_hook};
pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;
pub use parse::parse_suggestions;
pub use prompt::{build_prompt, GenerateMode};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Generation error types
///
/// Display strings are what clients see in the `error` field.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Request had no usable title
    #[error("Missing title")]
    MissingTitle,

    /// The provider rejected the request with a message
    #[error("{0}")]
    Upstream(String),

    /// The provider couldn't be reached
    #[error("{0}")]
    Network(String),

    /// The provider's reply wasn't understood
    #[error("{0}")]
    Parse(String),

    /// No API key configured
    #[error("AI generation is not configured")]
    NotConfigured,

    /// Failure without a message
    #[error("AI error")]
    Failed,
}

/// Text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model or backend identifier
    fn id(&self) -> &str;

    /// Returns the raw generated text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Body of a remote generation request
///
/// Fields accept any JSON value. Strings pass through as-is, `null`, `false`
/// and `0` count as absent, and other values use their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// `"hooks"`, or anything else for angles
    #[serde(default, deserialize_with = "loose_text")]
    pub mode: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "loose_text")]
    pub content_type: Option<String>,
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) => Some(text),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }))
}

/// Runs a remote generation request end to end
///
/// # Errors
///
/// [`GenerateError::MissingTitle`] when the title is absent or empty, before
/// the generator is called. A whitespace-only title is sent as-is. Generator errors pass through unchanged.
pub async fn generate_suggestions<G>(
    generator: &G,
    request: &GenerateRequest,
) -> Result<Vec<String>, GenerateError>
where
    G: TextGenerator + ?Sized,
{
    let title = request
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .ok_or(GenerateError::MissingTitle)?;

    let mode = GenerateMode::from_label(request.mode.as_deref());
    let prompt = build_prompt(mode, title, request.content_type.as_deref());

    let text = generator.generate(&prompt).await?;
    let items = parse_suggestions(&text);

    debug!(?mode, generator = generator.id(), count = items.len(), "Generated suggestions");
    Ok(items)
}

/// Locally generated ideas for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub hook: String,
    pub angles: Vec<String>,
}

impl Suggestions {
    /// A random hook plus the ten angles
    pub fn local(title: &str, content_type: &str) -> Self {
        Self {
            hook: hook_for(title, content_type),
            angles: repurpose_angles(title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: Option<&str>, title: Option<&str>, content_type: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            mode: mode.map(str::to_string),
            title: title.map(str::to_string),
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_request_uses_camel_case() {
        let parsed: GenerateRequest =
            serde_json::from_str(r#"{"mode":"hooks","title":"T","contentType":"Blog"}"#).unwrap();
        assert_eq!(parsed, request(Some("hooks"), Some("T"), Some("Blog")));

        let empty: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GenerateRequest::default());
    }

    #[tokio::test]
    async fn test_hooks_request() {
        let generator = MockGenerator::with_response("1. Alpha\n\n- Beta\n");
        let items = generate_suggestions(&generator, &request(Some("hooks"), Some("Budget tips"), Some("TikTok")))
            .await
            .unwrap();

        assert_eq!(items, vec!["Alpha", "Beta"]);
        assert_eq!(
            generator.last_prompt().unwrap(),
            build_prompt(GenerateMode::Hooks, "Budget tips", Some("TikTok"))
        );
    }

    #[tokio::test]
    async fn test_other_modes_ask_for_angles() {
        let generator = MockGenerator::default();
        generate_suggestions(&generator, &request(Some("remix"), Some("X"), None))
            .await
            .unwrap();

        assert!(generator
            .last_prompt()
            .unwrap()
            .starts_with("Generate 10 creative repurpose angles for a content piece"));
    }

    #[tokio::test]
    async fn test_missing_title_skips_generator() {
        let generator = MockGenerator::default();
        for title in [None, Some("")] {
            let err = generate_suggestions(&generator, &request(Some("hooks"), title, None))
                .await
                .unwrap_err();
            assert!(matches!(err, GenerateError::MissingTitle));
        }
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_title_reaches_generator() {
        let generator = MockGenerator::default();
        let items = generate_suggestions(&generator, &request(Some("hooks"), Some("   "), None))
            .await
            .unwrap();

        assert_eq!(items, vec!["Mock suggestion"]);
        assert_eq!(generator.call_count(), 1);
        assert!(generator.last_prompt().unwrap().contains("titled \"   \""));
    }

    #[test]
    fn test_request_coerces_non_string_fields() {
        let parsed: GenerateRequest =
            serde_json::from_str(r#"{"mode":true,"title":42,"contentType":null}"#).unwrap();
        assert_eq!(parsed, request(Some("true"), Some("42"), None));

        let falsy: GenerateRequest =
            serde_json::from_str(r#"{"mode":false,"title":0,"contentType":""}"#).unwrap();
        assert_eq!(falsy, request(None, None, Some("")));
    }

    #[tokio::test]
    async fn test_numeric_title_is_used() {
        let generator = MockGenerator::default();
        let parsed: GenerateRequest = serde_json::from_str(r#"{"title":42}"#).unwrap();

        generate_suggestions(&generator, &parsed).await.unwrap();
        assert!(generator.last_prompt().unwrap().contains("titled \"42\""));
    }

    #[tokio::test]
    async fn test_generator_error_passes_through() {
        let generator = MockGenerator::failing("Rate limit reached");
        let err = generate_suggestions(&generator, &request(None, Some("X"), None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Rate limit reached");
    }

    #[test]
    fn test_local_suggestions() {
        let suggestions = Suggestions::local("Morning routine", "Podcast");
        assert!(hook_pool("Morning routine", "Podcast").contains(&suggestions.hook));
        assert_eq!(suggestions.angles, repurpose_angles("Morning routine"));
    }
}
