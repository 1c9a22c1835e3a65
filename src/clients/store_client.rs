use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};
use crate::app_system::StoreError;
use crate::domain::{CartToggle, CatalogItem, EntityId};
use crate::store_actor::{StoreRequest, StoreState};

/// Handle the views hold. Cloning is cheap; every clone talks to the same store.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
    snapshots: watch::Receiver<StoreState>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>, snapshots: watch::Receiver<StoreState>) -> Self {
        Self { sender, snapshots }
    }

    /// Receives a fresh [`StoreState`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.snapshots.clone()
    }

    /// Resolves once the initial load has finished, successfully or not.
    pub async fn wait_until_loaded(&self) -> Result<StoreState, StoreError> {
        let mut snapshots = self.snapshots.clone();
        let state = snapshots
            .wait_for(|state| !state.is_loading)
            .await
            .map_err(|e| StoreError::ActorCommunicationError(e.to_string()))?;
        Ok((*state).clone())
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))
    }
}

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, StoreError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| StoreError::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

client_method!(StoreClient => fn add_to_cart(item: CatalogItem) -> CartToggle as StoreRequest::AddToCart);
client_method!(StoreClient => fn remove_cart_item(id: EntityId) -> () as StoreRequest::RemoveCartItem);
client_method!(StoreClient => fn add_favorite(item: CatalogItem) -> () as StoreRequest::AddFavorite);
client_method!(StoreClient => fn is_item_added(id: EntityId) -> bool as StoreRequest::IsItemAdded);
client_method!(StoreClient => fn set_search_value(value: String) -> () as StoreRequest::SetSearchValue);
client_method!(StoreClient => fn snapshot() -> StoreState as StoreRequest::GetSnapshot);
