/// Workspace provisioning
///
/// Maps every identity onto exactly one workspace. The first call for an
/// identity creates the workspace and its owner membership; every later call
/// finds it again and re-asserts the owner role.
///
/// # Example
///
/// ```
/// use grenade_shared::provision::ensure_workspace;
/// use grenade_shared::store::{ContentStore, MemoryStore};
///
/// # async fn example() -> Result<(), grenade_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let user = store.find_or_create_user("creator@example.com").await?;
///
/// let first = ensure_workspace(&store, user.id, "creator@example.com").await?;
/// let again = ensure_workspace(&store, user.id, "creator@example.com").await?;
/// assert_eq!(first, again);
/// # Ok(())
/// # }
/// ```

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{membership::CreateMembership, workspace::CreateWorkspace};
use crate::session::FALLBACK_LABEL;
use crate::store::{ContentStore, StoreResult};

/// Derives a workspace name from a display label
///
/// Uses the part of the label before the first `@`, falling back to
/// "Creator" when that part is empty.
///
/// ```
/// use grenade_shared::provision::workspace_name_for;
///
/// assert_eq!(workspace_name_for("maya@example.com"), "maya's Workspace");
/// assert_eq!(workspace_name_for("@example.com"), "Creator's Workspace");
/// ```
pub fn workspace_name_for(label: &str) -> String {
    let local = label.split('@').next().unwrap_or_default();
    let base = if local.is_empty() { FALLBACK_LABEL } else { local };
    format!("{}'s Workspace", base)
}

/// Returns the identity's workspace id, creating the workspace if needed
///
/// # Errors
///
/// Any backend error is returned as-is; nothing is retried. When creation
/// fails after the workspace row was written, the next call finds the
/// workspace and repairs the membership through the upsert path.
pub async fn ensure_workspace<S>(store: &S, user_id: Uuid, label: &str) -> StoreResult<Uuid>
where
    S: ContentStore + ?Sized,
{
    if let Some(existing) = store.find_workspace_by_owner(user_id).await? {
        store
            .upsert_membership(CreateMembership::owner(existing.id, user_id))
            .await?;
        debug!(%user_id, workspace_id = %existing.id, "Found existing workspace");
        return Ok(existing.id);
    }

    let workspace = store
        .create_workspace(CreateWorkspace {
            name: workspace_name_for(label),
            owner_id: user_id,
        })
        .await?;

    store
        .insert_membership(CreateMembership::owner(workspace.id, user_id))
        .await?;

    info!(
        %user_id,
        workspace_id = %workspace.id,
        name = %workspace.name,
        "Provisioned workspace"
    );
    Ok(workspace.id)
}
