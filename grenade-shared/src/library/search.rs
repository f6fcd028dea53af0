/// Client-side library search
///
/// Filtering is a pure function over the already-fetched list and is cheap
/// enough to recompute on every keystroke.

use crate::models::content_item::ContentItem;

/// Lowercased text an item is matched against
///
/// Title, notes, content type, stage and tags, separated by spaces.
pub fn search_blob(item: &ContentItem) -> String {
    format!(
        "{} {} {} {} {}",
        item.title,
        item.notes,
        item.content_type,
        item.stage,
        item.tags.join(" ")
    )
    .to_lowercase()
}

/// Items whose search blob contains the trimmed query, case-insensitively
///
/// An empty query returns every item. Order is preserved.
pub fn filter_items<'a>(items: &'a [ContentItem], query: &str) -> Vec<&'a ContentItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| search_blob(item).contains(&query))
        .collect()
}
