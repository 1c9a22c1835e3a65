use tokio::sync::oneshot;
use crate::app_system::{ResourceError, StoreError};
use crate::domain::{CartEntry, CartToggle, CatalogItem, EntityId, FavoriteEntry};
use super::StoreState;

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type StoreResponse<T> = oneshot::Sender<StoreResult<T>>;

/// Requests the views send to the store.
#[derive(Debug)]
pub enum StoreRequest {
    AddToCart {
        item: CatalogItem,
        respond_to: StoreResponse<CartToggle>,
    },
    RemoveCartItem {
        id: EntityId,
        respond_to: StoreResponse<()>,
    },
    AddFavorite {
        item: CatalogItem,
        respond_to: StoreResponse<()>,
    },
    IsItemAdded {
        id: EntityId,
        respond_to: StoreResponse<bool>,
    },
    SetSearchValue {
        value: String,
        respond_to: StoreResponse<()>,
    },
    GetSnapshot {
        respond_to: StoreResponse<StoreState>,
    },
    Shutdown,
}

/// The three collections fetched at startup.
#[derive(Debug)]
pub struct InitialCollections {
    pub cart_items: Vec<CartEntry>,
    pub favorites: Vec<FavoriteEntry>,
    pub items: Vec<CatalogItem>,
}

/// Backend responses fed back into the actor so state is only written there.
#[derive(Debug)]
pub enum StoreEvent {
    InitialLoad(Result<InitialCollections, ResourceError>),
    CartEntryCreated {
        result: Result<CartEntry, ResourceError>,
        respond_to: StoreResponse<CartToggle>,
    },
    FavoriteCreated(Result<FavoriteEntry, ResourceError>),
}
