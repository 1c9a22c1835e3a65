use crate::domain::{CartEntry, CatalogItem, EntityId, FavoriteEntry};
use super::InitialCollections;

/// Everything the views read: the three collections, the loading flag and the
/// current search text.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub items: Vec<CatalogItem>,
    pub cart_items: Vec<CartEntry>,
    pub favorites: Vec<FavoriteEntry>,
    pub is_loading: bool,
    pub search_value: String,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cart_items: Vec::new(),
            favorites: Vec::new(),
            is_loading: true,
            search_value: String::new(),
        }
    }
}

impl StoreState {
    /// Commits the initial load. Any failure empties all three collections.
    pub fn finish_loading(&mut self, loaded: Option<InitialCollections>) {
        match loaded {
            Some(collections) => {
                self.cart_items = collections.cart_items;
                self.favorites = collections.favorites;
                self.items = collections.items;
            }
            None => {
                self.cart_items.clear();
                self.favorites.clear();
                self.items.clear();
            }
        }
        self.is_loading = false;
    }

    // --- cart ---

    pub fn cart_entry_for(&self, catalog_id: &EntityId) -> Option<&CartEntry> {
        self.cart_items.iter().find(|entry| entry.is_for(catalog_id))
    }

    pub fn remove_cart_entries_for(&mut self, catalog_id: &EntityId) {
        self.cart_items.retain(|entry| !entry.is_for(catalog_id));
    }

    pub fn remove_cart_entry(&mut self, id: &EntityId) {
        self.cart_items.retain(|entry| !entry.has_id(id));
    }

    pub fn is_item_added(&self, catalog_id: &EntityId) -> bool {
        self.cart_items.iter().any(|entry| entry.is_for(catalog_id))
    }

    pub fn cart_total(&self) -> f64 {
        self.cart_items.iter().map(|entry| entry.price).sum()
    }

    // --- favorites ---

    /// Exact match on the favorite's own `id`, so `5` and `"5"` differ here.
    pub fn has_favorite_id(&self, id: &EntityId) -> bool {
        self.favorites.iter().any(|entry| entry.id == *id)
    }

    pub fn remove_favorite(&mut self, id: &EntityId) {
        self.favorites.retain(|entry| !entry.id.same_number(id));
    }

    /// Moves every pending favorite keyed by `confirmed.parent_id` to the
    /// backend id. Returns how many entries were confirmed.
    pub fn confirm_favorite(&mut self, confirmed: &FavoriteEntry) -> usize {
        let mut count = 0;
        for entry in self
            .favorites
            .iter_mut()
            .filter(|entry| entry.is_pending() && entry.parent_id == confirmed.parent_id)
        {
            entry.confirm(confirmed.id.clone());
            count += 1;
        }
        count
    }

    pub fn is_favorite(&self, catalog_id: &EntityId) -> bool {
        self.favorites
            .iter()
            .any(|entry| entry.parent_id.as_ref().is_some_and(|parent| parent.same_number(catalog_id)))
    }

    /// The backend-confirmed favorite for a catalog item, if one has arrived.
    pub fn confirmed_favorite_for(&self, catalog_id: &EntityId) -> Option<&FavoriteEntry> {
        self.favorites.iter().find(|entry| {
            !entry.is_pending() && entry.parent_id.as_ref().is_some_and(|parent| parent.same_number(catalog_id))
        })
    }

    // --- listing ---

    /// Catalog items whose title contains the search text, ignoring case.
    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        let needle = self.search_value.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect()
    }
}
