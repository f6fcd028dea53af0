/// Workspace model and database operations
///
/// A workspace is the container every content item belongs to. Each identity
/// owns exactly one, created lazily on first login (see [`crate::provision`]).
/// Workspaces are never deleted by the application.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE workspaces (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     owner_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Workspace model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workspace {
    /// Unique workspace ID (UUID v4)
    pub id: Uuid,

    /// Display name, e.g. "creator's Workspace"
    pub name: String,

    /// Owning identity
    pub owner_id: Uuid,

    /// When the workspace was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspace {
    /// Display name
    pub name: String,

    /// Owning identity
    pub owner_id: Uuid,
}

impl Workspace {
    /// Creates a new workspace
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner already has a workspace (unique constraint violation)
    /// - The owner doesn't exist (foreign key violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use grenade_shared::models::workspace::{Workspace, CreateWorkspace};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
    /// let workspace = Workspace::create(&pool, CreateWorkspace {
    ///     name: "creator's Workspace".to_string(),
    ///     owner_id,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateWorkspace) -> Result<Self, sqlx::Error> {
        let workspace = sqlx::query_as::<_, Workspace>(
            r#"
            INSERT INTO workspaces (name, owner_id)
            VALUES ($1, $2)
            RETURNING id, name, owner_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(workspace)
    }

    /// Finds the workspace owned by an identity
    ///
    /// # Returns
    ///
    /// The owned workspace if one exists, None otherwise
    pub async fn find_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let workspace = sqlx::query_as::<_, Workspace>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM workspaces
            WHERE owner_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(workspace)
    }
}
