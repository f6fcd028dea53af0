/// Library session state
///
/// [`LibrarySession`] is the state a front end keeps for one signed-in creator:
/// the resolved workspace, the fetched item list, the search query and the
/// item being edited. It reacts to auth-state changes from a
/// [`SessionContext`] and keeps the list in step with the backend by
/// adopting the re-fetched list after every mutation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use grenade_shared::library::ItemDraft;
/// use grenade_shared::session::{Identity, SessionContext};
/// use grenade_shared::store::{ContentStore, MemoryStore};
/// use grenade_shared::sync::LibrarySession;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let user = store.find_or_create_user("creator@example.com").await?;
/// let session = SessionContext::with_identity(user.identity());
///
/// let mut library = LibrarySession::boot(store, &session).await?;
/// library.save(&ItemDraft::titled("Morning routine")).await?;
/// library.set_query("routine");
/// assert_eq!(library.filtered().len(), 1);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::library::{filter_items, ItemDraft, Library, LibraryError};
use crate::models::content_item::ContentItem;
use crate::provision::ensure_workspace;
use crate::session::{AuthState, Identity, SessionContext};
use crate::store::{ContentStore, StoreError};

/// Session error types
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No identity, or no workspace resolved yet
    #[error("Not signed in")]
    NotSignedIn,

    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::Library(LibraryError::Store(err))
    }
}

/// Sync result type alias
pub type SyncResult<T> = Result<T, SyncError>;

/// Per-creator library state
pub struct LibrarySession<S: ContentStore + ?Sized> {
    store: Arc<S>,
    identity: Option<Identity>,
    library: Option<Library<S>>,
    items: Vec<ContentItem>,
    query: String,
    editing: Option<Uuid>,
}

impl<S: ContentStore + ?Sized> LibrarySession<S> {
    /// Creates a signed-out session
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            identity: None,
            library: None,
            items: Vec::new(),
            query: String::new(),
            editing: None,
        }
    }

    /// Starts a session from whatever identity the context currently holds
    ///
    /// With an identity this provisions the workspace and loads its items.
    /// Without one the session starts signed out with an empty list.
    pub async fn boot(store: Arc<S>, session: &SessionContext) -> SyncResult<Self> {
        let mut this = Self::new(store);
        if let Some(identity) = session.current() {
            this.activate(identity).await?;
        }
        Ok(this)
    }

    /// Applies an auth-state change
    ///
    /// Signing in as the already active identity is a no-op. Signing out
    /// drops the workspace, the list and any edit in progress.
    pub async fn on_auth_change(&mut self, state: AuthState) -> SyncResult<()> {
        match state {
            AuthState::SignedIn(identity) => {
                if self.identity.as_ref().map(|current| current.id) == Some(identity.id)
                    && self.library.is_some()
                {
                    return Ok(());
                }
                self.activate(identity).await
            }
            AuthState::SignedOut => {
                if let Some(previous) = self.identity.take() {
                    info!(user_id = %previous.id, "Cleared library session");
                }
                self.library = None;
                self.items.clear();
                self.editing = None;
                Ok(())
            }
        }
    }

    async fn activate(&mut self, identity: Identity) -> SyncResult<()> {
        self.library = None;
        self.items.clear();
        self.editing = None;

        let workspace_id = ensure_workspace(self.store.as_ref(), identity.id, identity.label()).await?;
        let library = Library::new(Arc::clone(&self.store), workspace_id);
        self.items = library.items().await?;

        info!(
            user_id = %identity.id,
            %workspace_id,
            count = self.items.len(),
            "Library session ready"
        );
        self.library = Some(library);
        self.identity = Some(identity);
        Ok(())
    }

    fn library(&self) -> SyncResult<&Library<S>> {
        self.library.as_ref().ok_or(SyncError::NotSignedIn)
    }

    /// Active identity
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Resolved workspace
    pub fn workspace_id(&self) -> Option<Uuid> {
        self.library.as_ref().map(Library::workspace_id)
    }

    /// Every fetched item, newest first
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Current search query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Item being edited, if any
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Replaces the search query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Items matching the current query
    pub fn filtered(&self) -> Vec<&ContentItem> {
        filter_items(&self.items, &self.query)
    }

    /// Enters edit mode for an item and returns its draft
    ///
    /// Returns None and leaves edit mode untouched when the item isn't loaded.
    pub fn start_edit(&mut self, id: Uuid) -> Option<ItemDraft> {
        let item = self.items.iter().find(|item| item.id == id)?;
        let draft = ItemDraft::from_item(item);
        self.editing = Some(id);
        debug!(item_id = %id, "Editing item");
        Some(draft)
    }

    /// Leaves edit mode without saving
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Creates an item, or updates the one being edited
    ///
    /// Edit mode is cleared only on success.
    pub async fn save(&mut self, draft: &ItemDraft) -> SyncResult<()> {
        let library = self.library()?;
        let items = match self.editing {
            Some(id) => library.update(id, draft).await?,
            None => library.create(draft).await?,
        };
        self.items = items;
        self.editing = None;
        Ok(())
    }

    /// Deletes an item; deleting the edited item also leaves edit mode
    pub async fn delete(&mut self, id: Uuid) -> SyncResult<()> {
        let items = self.library()?.delete(id).await?;
        self.items = items;
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(())
    }

    /// Re-fetches the list
    pub async fn refresh(&mut self) -> SyncResult<()> {
        let items = self.library()?.items().await?;
        self.items = items;
        Ok(())
    }
}
