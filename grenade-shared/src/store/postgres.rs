/// PostgreSQL-backed store
///
/// Thin adapter from [`ContentStore`] onto the model CRUD functions. Constraint
/// violations are translated into [`StoreError::Conflict`] and
/// [`StoreError::MissingReference`] so callers don't need to inspect sqlx errors.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{ContentStore, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    content_item::{ContentItem, ContentItemFields, CreateContentItem},
    magic_link::{CreateMagicLink, MagicLink},
    membership::{CreateMembership, Membership},
    user::User,
    workspace::{CreateWorkspace, Workspace},
};

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps constraint violations onto store errors
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return StoreError::Conflict(constraint);
        }
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or("foreign key").to_string();
            return StoreError::MissingReference(constraint);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl ContentStore for PgStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await.map_err(StoreError::from)
    }

    async fn find_or_create_user(&self, email: &str) -> StoreResult<User> {
        User::find_or_create_by_email(&self.pool, email)
            .await
            .map_err(classify)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn touch_last_login(&self, id: Uuid) -> StoreResult<()> {
        User::update_last_login(&self.pool, id).await?;
        Ok(())
    }

    async fn create_magic_link(&self, data: CreateMagicLink) -> StoreResult<MagicLink> {
        MagicLink::create(&self.pool, data).await.map_err(classify)
    }

    async fn consume_magic_link(&self, token_hash: &str) -> StoreResult<Option<MagicLink>> {
        Ok(MagicLink::consume(&self.pool, token_hash).await?)
    }

    async fn find_workspace_by_owner(&self, owner_id: Uuid) -> StoreResult<Option<Workspace>> {
        Ok(Workspace::find_by_owner(&self.pool, owner_id).await?)
    }

    async fn create_workspace(&self, data: CreateWorkspace) -> StoreResult<Workspace> {
        Workspace::create(&self.pool, data).await.map_err(classify)
    }

    async fn upsert_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        Membership::upsert(&self.pool, data).await.map_err(classify)
    }

    async fn insert_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        Membership::create(&self.pool, data).await.map_err(classify)
    }

    async fn list_items(&self, workspace_id: Uuid) -> StoreResult<Vec<ContentItem>> {
        let items = ContentItem::list_by_workspace(&self.pool, workspace_id).await?;
        debug!(%workspace_id, count = items.len(), "Fetched content items");
        Ok(items)
    }

    async fn find_item(&self, workspace_id: Uuid, id: Uuid) -> StoreResult<Option<ContentItem>> {
        Ok(ContentItem::find(&self.pool, workspace_id, id).await?)
    }

    async fn insert_item(&self, data: CreateContentItem) -> StoreResult<ContentItem> {
        ContentItem::create(&self.pool, data).await.map_err(classify)
    }

    async fn update_item(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        fields: ContentItemFields,
    ) -> StoreResult<Option<ContentItem>> {
        ContentItem::update(&self.pool, workspace_id, id, fields)
            .await
            .map_err(classify)
    }

    async fn delete_item(&self, workspace_id: Uuid, id: Uuid) -> StoreResult<bool> {
        Ok(ContentItem::delete(&self.pool, workspace_id, id).await?)
    }
}
