/// In-memory store
///
/// Keeps every relation in process memory behind a single `RwLock`. It enforces
/// the same keys and references as the PostgreSQL schema (unique email, one
/// workspace per owner, membership primary key, item-to-workspace reference) so
/// code tested against it behaves the same against [`super::PgStore`].
///
/// Writes can be made to fail on demand with [`MemoryStore::fail_writes_with`],
/// which is how tests exercise backend-error paths.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{ContentStore, StoreError, StoreResult};
use crate::models::{
    content_item::{ContentItem, ContentItemFields, CreateContentItem},
    magic_link::{CreateMagicLink, MagicLink},
    membership::{CreateMembership, Membership},
    user::{normalize_email, User},
    workspace::{CreateWorkspace, Workspace},
};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    magic_links: HashMap<String, MagicLink>,
    workspaces: HashMap<Uuid, Workspace>,
    memberships: HashMap<(Uuid, Uuid), Membership>,
    /// Items with their insertion sequence, used to order same-instant rows
    items: HashMap<Uuid, (u64, ContentItem)>,
    next_seq: u64,
}

/// Store that lives entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    write_failure: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with `message` until cleared
    pub fn fail_writes_with(&self, message: impl Into<String>) {
        if let Ok(mut failure) = self.write_failure.lock() {
            *failure = Some(message.into());
        }
    }

    /// Lets writes succeed again
    pub fn clear_write_failure(&self) {
        if let Ok(mut failure) = self.write_failure.lock() {
            *failure = None;
        }
    }

    /// Number of workspaces owned by an identity
    pub async fn workspace_count(&self, owner_id: Uuid) -> usize {
        let state = self.state.read().await;
        state
            .workspaces
            .values()
            .filter(|ws| ws.owner_id == owner_id)
            .count()
    }

    /// Looks up a membership row
    pub async fn membership(&self, workspace_id: Uuid, user_id: Uuid) -> Option<Membership> {
        let state = self.state.read().await;
        state.memberships.get(&(workspace_id, user_id)).cloned()
    }

    fn check_writable(&self) -> StoreResult<()> {
        match self.write_failure.lock() {
            Ok(failure) => match failure.as_ref() {
                Some(message) => Err(StoreError::Backend(message.clone())),
                None => Ok(()),
            },
            Err(_) => Err(StoreError::Backend("store lock poisoned".to_string())),
        }
    }
}

impl State {
    fn require_user(&self, id: Uuid) -> StoreResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::MissingReference(format!("users({})", id)))
        }
    }

    fn require_workspace(&self, id: Uuid) -> StoreResult<()> {
        if self.workspaces.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::MissingReference(format!("workspaces({})", id)))
        }
    }
}

fn check_title(fields: &ContentItemFields) -> StoreResult<()> {
    if fields.title.trim().is_empty() {
        return Err(StoreError::Backend(
            "new row violates check constraint \"content_items_title_not_blank\"".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_or_create_user(&self, email: &str) -> StoreResult<User> {
        self.check_writable()?;
        let email = normalize_email(email);
        let mut state = self.state.write().await;

        if let Some(user) = state.users.values().find(|u| u.email == email) {
            return Ok(user.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
            last_login_at: None,
        };
        state.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn touch_last_login(&self, id: Uuid) -> StoreResult<()> {
        self.check_writable()?;
        if let Some(user) = self.state.write().await.users.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_magic_link(&self, data: CreateMagicLink) -> StoreResult<MagicLink> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        if state.magic_links.contains_key(&data.token_hash) {
            return Err(StoreError::Conflict("magic_links_pkey".to_string()));
        }

        let link = MagicLink {
            token_hash: data.token_hash,
            email: normalize_email(&data.email),
            created_at: Utc::now(),
            expires_at: data.expires_at,
            consumed_at: None,
        };
        state.magic_links.insert(link.token_hash.clone(), link.clone());
        Ok(link)
    }

    async fn consume_magic_link(&self, token_hash: &str) -> StoreResult<Option<MagicLink>> {
        self.check_writable()?;
        let now = Utc::now();
        let mut state = self.state.write().await;

        match state.magic_links.get_mut(token_hash) {
            Some(link) if link.is_redeemable(now) => {
                link.consumed_at = Some(now);
                Ok(Some(link.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_workspace_by_owner(&self, owner_id: Uuid) -> StoreResult<Option<Workspace>> {
        let state = self.state.read().await;
        Ok(state
            .workspaces
            .values()
            .filter(|ws| ws.owner_id == owner_id)
            .min_by_key(|ws| ws.created_at)
            .cloned())
    }

    async fn create_workspace(&self, data: CreateWorkspace) -> StoreResult<Workspace> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.require_user(data.owner_id)?;

        if state.workspaces.values().any(|ws| ws.owner_id == data.owner_id) {
            return Err(StoreError::Conflict("workspaces_owner_id_key".to_string()));
        }

        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: data.name,
            owner_id: data.owner_id,
            created_at: Utc::now(),
        };
        state.workspaces.insert(workspace.id, workspace.clone());
        Ok(workspace)
    }

    async fn upsert_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.require_workspace(data.workspace_id)?;
        state.require_user(data.user_id)?;

        let key = (data.workspace_id, data.user_id);
        let membership = match state.memberships.get(&key) {
            Some(existing) => Membership {
                role: data.role,
                ..existing.clone()
            },
            None => Membership {
                workspace_id: data.workspace_id,
                user_id: data.user_id,
                role: data.role,
                created_at: Utc::now(),
            },
        };
        state.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn insert_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.require_workspace(data.workspace_id)?;
        state.require_user(data.user_id)?;

        let key = (data.workspace_id, data.user_id);
        if state.memberships.contains_key(&key) {
            return Err(StoreError::Conflict("workspace_members_pkey".to_string()));
        }

        let membership = Membership {
            workspace_id: data.workspace_id,
            user_id: data.user_id,
            role: data.role,
            created_at: Utc::now(),
        };
        state.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn list_items(&self, workspace_id: Uuid) -> StoreResult<Vec<ContentItem>> {
        let state = self.state.read().await;
        let mut rows: Vec<&(u64, ContentItem)> = state
            .items
            .values()
            .filter(|(_, item)| item.workspace_id == workspace_id)
            .collect();

        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        Ok(rows.into_iter().map(|(_, item)| item.clone()).collect())
    }

    async fn find_item(&self, workspace_id: Uuid, id: Uuid) -> StoreResult<Option<ContentItem>> {
        let state = self.state.read().await;
        Ok(state
            .items
            .get(&id)
            .filter(|(_, item)| item.workspace_id == workspace_id)
            .map(|(_, item)| item.clone()))
    }

    async fn insert_item(&self, data: CreateContentItem) -> StoreResult<ContentItem> {
        self.check_writable()?;
        check_title(&data.fields)?;
        let mut state = self.state.write().await;
        state.require_workspace(data.workspace_id)?;

        let now = Utc::now();
        let fields = data.fields;
        let item = ContentItem {
            id: Uuid::new_v4(),
            workspace_id: data.workspace_id,
            title: fields.title,
            notes: fields.notes,
            content_type: fields.content_type,
            stage: fields.stage,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.items.insert(item.id, (seq, item.clone()));
        Ok(item)
    }

    async fn update_item(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        fields: ContentItemFields,
    ) -> StoreResult<Option<ContentItem>> {
        self.check_writable()?;
        check_title(&fields)?;
        let mut state = self.state.write().await;

        match state.items.get_mut(&id) {
            Some((_, item)) if item.workspace_id == workspace_id => {
                item.title = fields.title;
                item.notes = fields.notes;
                item.content_type = fields.content_type;
                item.stage = fields.stage;
                item.tags = fields.tags;
                item.updated_at = Utc::now();
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_item(&self, workspace_id: Uuid, id: Uuid) -> StoreResult<bool> {
        self.check_writable()?;
        let mut state = self.state.write().await;

        let owned = matches!(state.items.get(&id), Some((_, item)) if item.workspace_id == workspace_id);
        if owned {
            state.items.remove(&id);
        }
        Ok(owned)
    }
}
