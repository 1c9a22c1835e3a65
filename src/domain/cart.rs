use serde::{Deserialize, Serialize};

use super::{CatalogItem, EntityId};

/// A catalog item placed in the cart. `id` is assigned by the cart backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub parent_id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
}

impl CartEntry {
    pub fn is_for(&self, catalog_id: &EntityId) -> bool {
        self.parent_id.same_number(catalog_id)
    }

    pub fn has_id(&self, id: &EntityId) -> bool {
        self.id.as_ref().is_some_and(|own| own.same_number(id))
    }
}

/// Outcome of a cart toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum CartToggle {
    Added(CartEntry),
    Removed(CartEntry),
}

/// The catalog item an entry was made from, keyed by its `parent_id`.
impl From<&CartEntry> for CatalogItem {
    fn from(entry: &CartEntry) -> Self {
        CatalogItem {
            id: entry.parent_id.clone(),
            parent_id: Some(entry.parent_id.clone()),
            title: entry.title.clone(),
            price: entry.price,
            image_url: entry.image_url.clone(),
        }
    }
}
