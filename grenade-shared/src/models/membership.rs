/// Workspace membership model and database operations
///
/// Memberships link identities to workspaces with a role. The application only
/// ever writes the owner row during provisioning; the table exists so the
/// backend's access policy has something to check against.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE workspace_role AS ENUM ('owner', 'admin', 'member');
///
/// CREATE TABLE workspace_members (
///     workspace_id UUID NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role workspace_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (workspace_id, user_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use grenade_shared::models::membership::{Membership, CreateMembership, WorkspaceRole};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, workspace_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
/// Membership::upsert(&pool, CreateMembership {
///     workspace_id,
///     user_id,
///     role: WorkspaceRole::Owner,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Roles within a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "workspace_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    /// Owns the workspace
    Owner,

    /// Can manage every item in the workspace
    Admin,

    /// Regular collaborator
    Member,
}

impl WorkspaceRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceRole::Owner => "owner",
            WorkspaceRole::Admin => "admin",
            WorkspaceRole::Member => "member",
        }
    }
}

/// Membership model representing an identity's role in a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Workspace ID
    pub workspace_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the workspace
    pub role: WorkspaceRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating or upserting a membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    /// Workspace ID
    pub workspace_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign (defaults to Member)
    #[serde(default = "default_role")]
    pub role: WorkspaceRole,
}

fn default_role() -> WorkspaceRole {
    WorkspaceRole::Member
}

impl CreateMembership {
    /// Owner membership for a freshly provisioned workspace
    pub fn owner(workspace_id: Uuid, user_id: Uuid) -> Self {
        Self {
            workspace_id,
            user_id,
            role: WorkspaceRole::Owner,
        }
    }
}

impl Membership {
    /// Inserts a new membership
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Membership already exists (primary key violation)
    /// - Workspace or user doesn't exist (foreign key violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO workspace_members (workspace_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING workspace_id, user_id, role, created_at
            "#,
        )
        .bind(data.workspace_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Inserts the membership or overwrites the role of an existing one
    pub async fn upsert(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO workspace_members (workspace_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (workspace_id, user_id) DO UPDATE SET role = EXCLUDED.role
            RETURNING workspace_id, user_id, role, created_at
            "#,
        )
        .bind(data.workspace_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }
}
