/// Content item endpoints
///
/// All routes are scoped to the workspace in the caller's access token. Every
/// mutation answers with the full re-fetched list.
///
/// # Endpoints
///
/// - `GET    /v1/items?q=` - List (optionally filtered)
/// - `POST   /v1/items` - Create
/// - `PUT    /v1/items/:id` - Replace fields
/// - `DELETE /v1/items/:id` - Delete
/// - `GET    /v1/items/:id/suggestions` - Local hook and angles
/// - `GET    /v1/library/options` - Suggested content types and stages

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use grenade_shared::{
    auth::middleware::AuthContext,
    generate::Suggestions,
    library::{filter_items, ItemDraft, CONTENT_TYPES, STAGES},
    models::content_item::ContentItem,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive search over title, notes, type, stage and tags
    pub q: Option<String>,
}

/// Item list
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    /// Items, newest first
    pub items: Vec<ContentItem>,

    /// Number of items in the workspace, before filtering
    pub total: usize,
}

impl From<Vec<ContentItem>> for ItemsResponse {
    fn from(items: Vec<ContentItem>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Suggested labels for the item form
#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryOptions {
    pub content_types: Vec<String>,
    pub stages: Vec<String>,
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ItemsResponse>> {
    let items = state.library(&auth).items().await?;
    let total = items.len();

    let items = match query.q.as_deref() {
        Some(q) => filter_items(&items, q).into_iter().cloned().collect(),
        None => items,
    };

    Ok(Json(ItemsResponse { items, total }))
}

/// Create an item
///
/// # Errors
///
/// - `400 Bad Request`: Blank title
pub async fn create_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<(StatusCode, Json<ItemsResponse>)> {
    let items = state.library(&auth).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(items.into())))
}

/// Replace an item's fields
///
/// # Errors
///
/// - `400 Bad Request`: Blank title
/// - `404 Not Found`: No such item in this workspace
pub async fn update_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<Json<ItemsResponse>> {
    let items = state.library(&auth).update(id, &draft).await?;
    Ok(Json(items.into()))
}

/// Delete an item
///
/// # Errors
///
/// - `404 Not Found`: No such item in this workspace
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ItemsResponse>> {
    let items = state.library(&auth).delete(id).await?;
    Ok(Json(items.into()))
}

/// Locally generated hook and repurpose angles for a stored item
pub async fn item_suggestions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Suggestions>> {
    let item = state.library(&auth).find(id).await?;

    Ok(Json(Suggestions::local(&item.title, &item.content_type)))
}

pub async fn library_options() -> Json<LibraryOptions> {
    Json(LibraryOptions {
        content_types: CONTENT_TYPES.iter().map(|s| s.to_string()).collect(),
        stages: STAGES.iter().map(|s| s.to_string()).collect(),
    })
}
