/// Prompt construction for remote generation

use serde::{Deserialize, Serialize};

/// What to ask the model for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateMode {
    /// Twelve short hooks
    Hooks,
    /// Ten repurpose angles
    Angles,
}

impl GenerateMode {
    /// Interprets a request's mode label
    ///
    /// Only `"hooks"` selects [`GenerateMode::Hooks`]; anything else,
    /// including no label, asks for angles.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("hooks") => GenerateMode::Hooks,
            _ => GenerateMode::Angles,
        }
    }
}

/// Builds the model prompt
///
/// A missing or empty content type reads as "content piece".
///
/// ```
/// use grenade_shared::generate::prompt::{build_prompt, GenerateMode};
///
/// let prompt = build_prompt(GenerateMode::Hooks, "Budget tips", Some("TikTok"));
/// assert!(prompt.starts_with("Generate 12 powerful scroll-stopping hooks for a TikTok"));
/// ```
pub fn build_prompt(mode: GenerateMode, title: &str, content_type: Option<&str>) -> String {
    let content_type = match content_type {
        Some(ct) if !ct.is_empty() => ct,
        _ => "content piece",
    };

    match mode {
        GenerateMode::Hooks => format!(
            "Generate 12 powerful scroll-stopping hooks for a {} titled \"{}\". Short. Punchy. No emojis.",
            content_type, title
        ),
        GenerateMode::Angles => format!(
            "Generate 10 creative repurpose angles for a {} titled \"{}\". Each should feel like a distinct content idea.",
            content_type, title
        ),
    }
}
