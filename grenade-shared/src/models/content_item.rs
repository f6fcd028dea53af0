/// Content item model and database operations
///
/// Content items are the library entries: an idea, draft, script, anything a
/// creator wants to keep. Every query is scoped by workspace, so an item id
/// from another workspace behaves exactly like an id that doesn't exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE content_items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     workspace_id UUID NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     notes TEXT NOT NULL DEFAULT '',
///     content_type TEXT NOT NULL DEFAULT 'General',
///     stage TEXT NOT NULL DEFAULT 'Idea',
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use grenade_shared::models::content_item::{ContentItem, ContentItemFields, CreateContentItem};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, workspace_id: Uuid) -> Result<(), sqlx::Error> {
/// ContentItem::create(&pool, CreateContentItem {
///     workspace_id,
///     fields: ContentItemFields {
///         title: "10 hooks for procrastination".to_string(),
///         notes: String::new(),
///         content_type: "TikTok".to_string(),
///         stage: "Idea".to_string(),
///         tags: vec!["hooks".to_string()],
///     },
/// }).await?;
///
/// let newest_first = ContentItem::list_by_workspace(&pool, workspace_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A stored library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentItem {
    /// Unique item ID (UUID v4)
    pub id: Uuid,

    /// Owning workspace
    pub workspace_id: Uuid,

    /// Non-empty title
    pub title: String,

    /// Free-form notes, script fragments, outline
    pub notes: String,

    /// Platform/format label; the suggested values live in
    /// [`crate::library::CONTENT_TYPES`] but any string is accepted
    pub content_type: String,

    /// Production stage label; see [`crate::library::STAGES`]
    pub stage: String,

    /// Ordered tags
    pub tags: Vec<String>,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last edited
    pub updated_at: DateTime<Utc>,
}

/// The user-editable field set shared by create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItemFields {
    pub title: String,
    pub notes: String,
    pub content_type: String,
    pub stage: String,
    pub tags: Vec<String>,
}

/// Input for creating a new content item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContentItem {
    /// Owning workspace
    pub workspace_id: Uuid,

    /// Initial field values
    pub fields: ContentItemFields,
}

impl ContentItem {
    /// Creates a new content item
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workspace doesn't exist (foreign key violation)
    /// - The title is blank (check constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateContentItem) -> Result<Self, sqlx::Error> {
        let fields = data.fields;
        let item = sqlx::query_as::<_, ContentItem>(
            r#"
            INSERT INTO content_items (workspace_id, title, notes, content_type, stage, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, workspace_id, title, notes, content_type, stage, tags,
                      created_at, updated_at
            "#,
        )
        .bind(data.workspace_id)
        .bind(fields.title)
        .bind(fields.notes)
        .bind(fields.content_type)
        .bind(fields.stage)
        .bind(fields.tags)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    /// Lists every item in a workspace, newest first
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = sqlx::query_as::<_, ContentItem>(
            r#"
            SELECT id, workspace_id, title, notes, content_type, stage, tags,
                   created_at, updated_at
            FROM content_items
            WHERE workspace_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Finds an item by ID within a workspace
    pub async fn find(
        pool: &PgPool,
        workspace_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, ContentItem>(
            r#"
            SELECT id, workspace_id, title, notes, content_type, stage, tags,
                   created_at, updated_at
            FROM content_items
            WHERE workspace_id = $1 AND id = $2
            "#,
        )
        .bind(workspace_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Replaces the editable fields of an item
    ///
    /// # Returns
    ///
    /// The updated item, or None if no item with this ID exists in the workspace
    pub async fn update(
        pool: &PgPool,
        workspace_id: Uuid,
        id: Uuid,
        fields: ContentItemFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, ContentItem>(
            r#"
            UPDATE content_items
            SET title = $3, notes = $4, content_type = $5, stage = $6, tags = $7,
                updated_at = NOW()
            WHERE workspace_id = $1 AND id = $2
            RETURNING id, workspace_id, title, notes, content_type, stage, tags,
                      created_at, updated_at
            "#,
        )
        .bind(workspace_id)
        .bind(id)
        .bind(fields.title)
        .bind(fields.notes)
        .bind(fields.content_type)
        .bind(fields.stage)
        .bind(fields.tags)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Deletes an item
    ///
    /// # Returns
    ///
    /// true if an item was removed
    pub async fn delete(pool: &PgPool, workspace_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM content_items
            WHERE workspace_id = $1 AND id = $2
            "#,
        )
        .bind(workspace_id)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
