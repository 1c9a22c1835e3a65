use serde::{Deserialize, Serialize};

use super::EntityId;

/// A sellable product from the items backend. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
}

impl CatalogItem {
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>, price: f64, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            title: title.into(),
            price,
            image_url: image_url.into(),
        }
    }

    /// Body sent when creating a cart or favorite entry. The entry's `parentId`
    /// points back at this item; an explicit `parentId` is kept as is.
    pub fn to_entry_payload(&self) -> CatalogItem {
        let mut payload = self.clone();
        if payload.parent_id.is_none() {
            payload.parent_id = Some(self.id.clone());
        }
        payload
    }
}
