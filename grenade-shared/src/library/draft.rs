/// Item drafts: the form fields a creator fills in before saving
///
/// A draft is what arrives from the edit form or the HTTP body. Validation
/// trims it into [`ContentItemFields`], the shape the store persists.

use serde::{Deserialize, Serialize};

use super::{LibraryError, DEFAULT_CONTENT_TYPE, DEFAULT_STAGE};
use crate::models::content_item::{ContentItem, ContentItemFields};

/// Splits a comma-separated tag string
///
/// Each segment is trimmed and empty segments are dropped; order is kept.
///
/// ```
/// use grenade_shared::library::parse_tags;
///
/// assert_eq!(parse_tags("a, b ,,c"), vec!["a", "b", "c"]);
/// assert!(parse_tags(" , ").is_empty());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tags as submitted: a comma-separated string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    Csv(String),
    List(Vec<String>),
}

impl Default for TagInput {
    fn default() -> Self {
        TagInput::Csv(String::new())
    }
}

impl TagInput {
    /// Normalized tag list
    pub fn to_tags(&self) -> Vec<String> {
        match self {
            TagInput::Csv(csv) => parse_tags(csv),
            TagInput::List(list) => list
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Unvalidated item fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub notes: String,

    /// Defaults to "General" when absent or blank
    #[serde(default)]
    pub content_type: Option<String>,

    /// Defaults to "Idea" when absent or blank
    #[serde(default)]
    pub stage: Option<String>,

    #[serde(default)]
    pub tags: TagInput,
}

fn label_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default.to_string(),
    }
}

impl ItemDraft {
    /// Draft with just a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Loads an existing item into a draft for editing
    ///
    /// Tags are joined back into the `", "`-separated form the edit field uses.
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            notes: item.notes.clone(),
            content_type: Some(item.content_type.clone()),
            stage: Some(item.stage.clone()),
            tags: TagInput::Csv(item.tags.join(", ")),
        }
    }

    /// Checks the draft and produces the fields to persist
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::MissingTitle`] when the trimmed title is empty
    pub fn validate(&self) -> Result<ContentItemFields, LibraryError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LibraryError::MissingTitle);
        }

        Ok(ContentItemFields {
            title: title.to_string(),
            notes: self.notes.trim().to_string(),
            content_type: label_or(&self.content_type, DEFAULT_CONTENT_TYPE),
            stage: label_or(&self.stage, DEFAULT_STAGE),
            tags: self.tags.to_tags(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("a, b ,,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_tags("mindset, hooks, growth"), vec!["mindset", "hooks", "growth"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(",,,").is_empty());
    }

    #[test]
    fn test_tag_input_from_json() {
        let csv: TagInput = serde_json::from_str("\"a, b\"").unwrap();
        assert_eq!(csv.to_tags(), vec!["a", "b"]);

        let list: TagInput = serde_json::from_str("[\" a \", \"\", \"b\"]").unwrap();
        assert_eq!(list.to_tags(), vec!["a", "b"]);
    }

    #[test]
    fn test_validate_applies_defaults() {
        let fields = ItemDraft::titled("  My idea  ").validate().unwrap();
        assert_eq!(fields.title, "My idea");
        assert_eq!(fields.content_type, "General");
        assert_eq!(fields.stage, "Idea");
        assert!(fields.tags.is_empty());
        assert!(fields.notes.is_empty());
    }

    #[test]
    fn test_validate_keeps_free_form_labels() {
        let draft = ItemDraft {
            title: "Launch".to_string(),
            notes: "  outline\n".to_string(),
            content_type: Some("Livestream VOD".to_string()),
            stage: Some("Blocked".to_string()),
            tags: TagInput::Csv("launch, q3".to_string()),
        };

        let fields = draft.validate().unwrap();
        assert_eq!(fields.notes, "outline");
        assert_eq!(fields.content_type, "Livestream VOD");
        assert_eq!(fields.stage, "Blocked");
        assert_eq!(fields.tags, vec!["launch", "q3"]);
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        assert!(matches!(
            ItemDraft::titled("   ").validate(),
            Err(LibraryError::MissingTitle)
        ));
    }

    #[test]
    fn test_from_item_round_trips_tags() {
        let item = ContentItem {
            id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
            title: "Edit me".to_string(),
            notes: "n".to_string(),
            content_type: "Blog".to_string(),
            stage: "Draft".to_string(),
            tags: vec!["one".to_string(), "two".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let draft = ItemDraft::from_item(&item);
        assert_eq!(draft.tags, TagInput::Csv("one, two".to_string()));
        assert_eq!(draft.validate().unwrap().tags, item.tags);
    }
}
