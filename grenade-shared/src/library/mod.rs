/// Content library
///
/// The workspace-scoped CRUD service behind the item list. Every mutation
/// writes through the [`ContentStore`] and then re-fetches the whole list, so
/// callers always hold exactly what the backend holds.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use grenade_shared::library::{ItemDraft, Library};
/// use grenade_shared::provision::ensure_workspace;
/// use grenade_shared::store::{ContentStore, MemoryStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let user = store.find_or_create_user("creator@example.com").await?;
/// let ws = ensure_workspace(store.as_ref(), user.id, "creator@example.com").await?;
///
/// let library = Library::new(store, ws);
/// let items = library.create(&ItemDraft::titled("First idea")).await?;
/// assert_eq!(items[0].title, "First idea");
/// # Ok(())
/// # }
/// ```

pub mod draft;
pub mod search;

pub use draft::{parse_tags, ItemDraft, TagInput};
pub use search::{filter_items, search_blob};

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::content_item::{ContentItem, CreateContentItem};
use crate::store::{ContentStore, StoreError};

/// Suggested content types, in display order
pub const CONTENT_TYPES: [&str; 8] = [
    "General",
    "Podcast",
    "YouTube",
    "TikTok",
    "Instagram",
    "Blog",
    "Newsletter",
    "Stream",
];

/// Suggested production stages, in display order
pub const STAGES: [&str; 7] = [
    "Idea",
    "Draft",
    "Script",
    "Recorded",
    "Edited",
    "Posted",
    "Repurposed",
];

/// Content type used when none is given
pub const DEFAULT_CONTENT_TYPE: &str = "General";

/// Stage used when none is given
pub const DEFAULT_STAGE: &str = "Idea";

/// Library error types
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Title was empty after trimming
    #[error("Missing title")]
    MissingTitle,

    /// The item isn't in this workspace
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    /// The store rejected the operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Library result type alias
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Item CRUD bound to one workspace
pub struct Library<S: ContentStore + ?Sized> {
    store: Arc<S>,
    workspace_id: Uuid,
}

impl<S: ContentStore + ?Sized> Clone for Library<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            workspace_id: self.workspace_id,
        }
    }
}

impl<S: ContentStore + ?Sized> Library<S> {
    /// Binds the store to a workspace
    pub fn new(store: Arc<S>, workspace_id: Uuid) -> Self {
        Self {
            store,
            workspace_id,
        }
    }

    /// Workspace this library is bound to
    pub fn workspace_id(&self) -> Uuid {
        self.workspace_id
    }

    /// Every item in the workspace, newest first
    pub async fn items(&self) -> LibraryResult<Vec<ContentItem>> {
        let items = self.store.list_items(self.workspace_id).await?;
        debug!(workspace_id = %self.workspace_id, count = items.len(), "Loaded items");
        Ok(items)
    }

    /// One item of this workspace
    ///
    /// # Errors
    ///
    /// [`LibraryError::NotFound`] when the id isn't in this workspace.
    pub async fn find(&self, id: Uuid) -> LibraryResult<ContentItem> {
        self.store
            .find_item(self.workspace_id, id)
            .await?
            .ok_or(LibraryError::NotFound(id))
    }

    /// Creates an item and returns the refreshed list
    ///
    /// # Errors
    ///
    /// [`LibraryError::MissingTitle`] before anything is written, otherwise
    /// whatever the store reports.
    pub async fn create(&self, draft: &ItemDraft) -> LibraryResult<Vec<ContentItem>> {
        let fields = draft.validate()?;
        let item = self
            .store
            .insert_item(CreateContentItem {
                workspace_id: self.workspace_id,
                fields,
            })
            .await?;

        info!(workspace_id = %self.workspace_id, item_id = %item.id, "Created item");
        self.items().await
    }

    /// Replaces an item's fields and returns the refreshed list
    pub async fn update(&self, id: Uuid, draft: &ItemDraft) -> LibraryResult<Vec<ContentItem>> {
        let fields = draft.validate()?;
        self.store
            .update_item(self.workspace_id, id, fields)
            .await?
            .ok_or(LibraryError::NotFound(id))?;

        info!(workspace_id = %self.workspace_id, item_id = %id, "Updated item");
        self.items().await
    }

    /// Deletes an item and returns the refreshed list
    pub async fn delete(&self, id: Uuid) -> LibraryResult<Vec<ContentItem>> {
        if !self.store.delete_item(self.workspace_id, id).await? {
            return Err(LibraryError::NotFound(id));
        }

        info!(workspace_id = %self.workspace_id, item_id = %id, "Deleted item");
        self.items().await
    }
}
