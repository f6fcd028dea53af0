/// Storage backend abstraction
///
/// Everything above the models layer (provisioning, the library service, the
/// HTTP routes) talks to a [`ContentStore`] rather than to PostgreSQL directly.
/// Two implementations exist:
///
/// - [`PgStore`]: PostgreSQL via sqlx, delegating to the model CRUD functions
/// - [`MemoryStore`]: in-process maps, for tests and for running without a database
///
/// # Workspace scoping
///
/// Item updates and deletes take the caller's workspace id. An item id that
/// belongs to a different workspace is reported exactly like a missing one.
///
/// # Example
///
/// ```
/// use grenade_shared::store::{ContentStore, MemoryStore};
/// use grenade_shared::models::workspace::CreateWorkspace;
///
/// # async fn example() -> Result<(), grenade_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let user = store.find_or_create_user("creator@example.com").await?;
/// let ws = store
///     .create_workspace(CreateWorkspace { name: "creator's Workspace".into(), owner_id: user.id })
///     .await?;
/// assert!(store.list_items(ws.id).await?.is_empty());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    content_item::{ContentItem, ContentItemFields, CreateContentItem},
    magic_link::{CreateMagicLink, MagicLink},
    membership::{CreateMembership, Membership},
    user::User,
    workspace::{CreateWorkspace, Workspace},
};

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// PostgreSQL reported an error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced row doesn't exist
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// The backend refused the operation
    #[error("{0}")]
    Backend(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Backend operations the application needs
///
/// Mirrors the relations of the hosted backend: identities and their login
/// links, `workspaces`, `workspace_members` and `content_items`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short backend name for logs and health output
    fn name(&self) -> &str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Finds the identity for an email, creating it on first login
    async fn find_or_create_user(&self, email: &str) -> StoreResult<User>;

    /// Finds an identity by id
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Records a successful login
    async fn touch_last_login(&self, id: Uuid) -> StoreResult<()>;

    /// Stores a newly issued login link
    async fn create_magic_link(&self, data: CreateMagicLink) -> StoreResult<MagicLink>;

    /// Redeems a login link; None when unknown, expired or already used
    async fn consume_magic_link(&self, token_hash: &str) -> StoreResult<Option<MagicLink>>;

    /// Finds the workspace owned by an identity
    async fn find_workspace_by_owner(&self, owner_id: Uuid) -> StoreResult<Option<Workspace>>;

    /// Creates a workspace
    async fn create_workspace(&self, data: CreateWorkspace) -> StoreResult<Workspace>;

    /// Inserts a membership or overwrites the role of an existing one
    async fn upsert_membership(&self, data: CreateMembership) -> StoreResult<Membership>;

    /// Inserts a membership; fails if it already exists
    async fn insert_membership(&self, data: CreateMembership) -> StoreResult<Membership>;

    /// Lists every item in a workspace, newest first
    async fn list_items(&self, workspace_id: Uuid) -> StoreResult<Vec<ContentItem>>;

    /// Finds one item; None if it isn't in the workspace
    async fn find_item(&self, workspace_id: Uuid, id: Uuid) -> StoreResult<Option<ContentItem>>;

    /// Creates an item
    async fn insert_item(&self, data: CreateContentItem) -> StoreResult<ContentItem>;

    /// Replaces an item's editable fields; None if the item isn't in the workspace
    async fn update_item(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        fields: ContentItemFields,
    ) -> StoreResult<Option<ContentItem>>;

    /// Deletes an item; false if the item isn't in the workspace
    async fn delete_item(&self, workspace_id: Uuid, id: Uuid) -> StoreResult<bool>;
}
