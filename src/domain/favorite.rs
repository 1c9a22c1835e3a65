use serde::{Deserialize, Serialize};

use super::{CatalogItem, EntityId};

/// Where a favorite stands relative to the favorites backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteSync {
    /// Inserted locally; `id` is still the catalog item's id.
    Pending,
    /// `id` was assigned by the backend.
    #[default]
    Confirmed,
}

/// A catalog item marked as favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(skip)]
    pub sync: FavoriteSync,
}

impl FavoriteEntry {
    /// Optimistic entry built from the creation payload, keyed by its `parent_id`.
    pub fn pending(payload: &CatalogItem) -> Self {
        Self {
            id: payload.id.clone(),
            parent_id: payload.parent_id.clone(),
            title: payload.title.clone(),
            price: payload.price,
            image_url: payload.image_url.clone(),
            sync: FavoriteSync::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sync == FavoriteSync::Pending
    }

    /// Takes the backend id; every other field stays as it was.
    pub fn confirm(&mut self, id: EntityId) {
        self.id = id;
        self.sync = FavoriteSync::Confirmed;
    }
}

impl From<&FavoriteEntry> for CatalogItem {
    fn from(entry: &FavoriteEntry) -> Self {
        CatalogItem {
            id: entry.id.clone(),
            parent_id: entry.parent_id.clone(),
            title: entry.title.clone(),
            price: entry.price,
            image_url: entry.image_url.clone(),
        }
    }
}
