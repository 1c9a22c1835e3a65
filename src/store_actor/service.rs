use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use crate::app_system::{ResourceError, StoreError};
use crate::clients::{CartClient, CatalogClient, FavoriteClient, StoreClient};
use crate::domain::{CartEntry, CartToggle, CatalogItem, EntityId, FavoriteEntry};
use super::{
    InitialCollections, Notifier, StoreEvent, StoreRequest, StoreResponse, StoreState, CART_TOGGLE_ALERT,
};

/// Owns [`StoreState`] and applies every change to it.
///
/// Requests are handled one at a time. Backend calls run in spawned tasks and
/// report back through [`StoreEvent`]s, so a slow response never blocks the
/// views and responses may land in any order.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    events: mpsc::UnboundedReceiver<StoreEvent>,
    events_tx: mpsc::UnboundedSender<StoreEvent>,
    snapshots: watch::Sender<StoreState>,
    catalog_client: CatalogClient,
    cart_client: CartClient,
    favorite_client: FavoriteClient,
    notifier: Arc<dyn Notifier>,
    state: StoreState,
}

impl StoreService {
    pub fn new(
        buffer_size: usize,
        catalog_client: CatalogClient,
        cart_client: CartClient,
        favorite_client: FavoriteClient,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events_tx, events) = mpsc::unbounded_channel();
        let state = StoreState::default();
        let (snapshots, snapshot_rx) = watch::channel(state.clone());
        let service = Self {
            receiver,
            events,
            events_tx,
            snapshots,
            catalog_client,
            cart_client,
            favorite_client,
            notifier,
            state,
        };
        let client = StoreClient::new(sender, snapshot_rx);
        (service, client)
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");
        self.start_initial_load();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(StoreRequest::Shutdown) | None => {
                        info!("StoreService shutting down");
                        break;
                    }
                    Some(request) => self.handle_request(request),
                },
                Some(event) = self.events.recv() => self.handle_event(event),
            }
        }

        info!("StoreService stopped");
    }

    fn handle_request(&mut self, request: StoreRequest) {
        match request {
            StoreRequest::AddToCart { item, respond_to } => {
                self.handle_add_to_cart(item, respond_to);
            }
            StoreRequest::RemoveCartItem { id, respond_to } => {
                self.handle_remove_cart_item(id, respond_to);
            }
            StoreRequest::AddFavorite { item, respond_to } => {
                self.handle_add_favorite(item, respond_to);
            }
            StoreRequest::IsItemAdded { id, respond_to } => {
                let _ = respond_to.send(Ok(self.state.is_item_added(&id)));
            }
            StoreRequest::SetSearchValue { value, respond_to } => {
                self.state.search_value = value;
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            StoreRequest::GetSnapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.state.clone()));
            }
            StoreRequest::Shutdown => {}
        }
    }

    fn handle_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::InitialLoad(result) => self.handle_initial_load(result),
            StoreEvent::CartEntryCreated { result, respond_to } => {
                self.handle_cart_entry_created(result, respond_to);
            }
            StoreEvent::FavoriteCreated(result) => self.handle_favorite_created(result),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }

    // -------------------------------------------------------------------------
    // Initial load
    // -------------------------------------------------------------------------

    /// Fetches cart, favorites and catalog concurrently. The first failure
    /// fails the whole load.
    fn start_initial_load(&self) {
        let catalog_client = self.catalog_client.clone();
        let cart_client = self.cart_client.clone();
        let favorite_client = self.favorite_client.clone();
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            let result = tokio::try_join!(
                cart_client.list_cart_entries(),
                favorite_client.list_favorites(),
                catalog_client.list_items(),
            )
            .map(|(cart_items, favorites, items)| InitialCollections {
                cart_items,
                favorites,
                items,
            });
            let _ = events.send(StoreEvent::InitialLoad(result));
        });
    }

    #[instrument(skip(self, result))]
    fn handle_initial_load(&mut self, result: Result<InitialCollections, ResourceError>) {
        match result {
            Ok(collections) => {
                info!(
                    items = collections.items.len(),
                    cart_items = collections.cart_items.len(),
                    favorites = collections.favorites.len(),
                    "Initial load complete"
                );
                self.state.finish_loading(Some(collections));
            }
            Err(e) => {
                error!(error = %e, "Initial load failed, starting empty");
                self.state.finish_loading(None);
            }
        }
        self.publish();
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Removes the item from the cart if it is there, adds it otherwise.
    ///
    /// Removal is applied locally before the backend is asked; a failed
    /// deletion raises the alert but the entry stays removed. Creation only
    /// touches local state once the backend has assigned an id.
    #[instrument(fields(catalog_id = %item.id), skip(self, item, respond_to))]
    fn handle_add_to_cart(&mut self, item: CatalogItem, respond_to: StoreResponse<CartToggle>) {
        if let Some(existing) = self.state.cart_entry_for(&item.id).cloned() {
            debug!("Item already in cart, removing");
            self.state.remove_cart_entries_for(&item.id);
            self.publish();

            let cart_client = self.cart_client.clone();
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                let result = match existing.id.clone() {
                    Some(id) => cart_client.delete_cart_entry(id).await.map_err(|e| e.to_string()),
                    None => Err("cart entry has no server id".to_string()),
                };
                let result = match result {
                    Ok(()) => {
                        info!(parent_id = %existing.parent_id, "Cart entry deleted");
                        Ok(CartToggle::Removed(existing))
                    }
                    Err(reason) => {
                        error!(error = %reason, "Cart entry deletion failed");
                        notifier.alert(CART_TOGGLE_ALERT);
                        Err(StoreError::CartToggleFailed(reason))
                    }
                };
                let _ = respond_to.send(result);
            });
        } else {
            debug!("Item not in cart, creating entry");
            let cart_client = self.cart_client.clone();
            let events = self.events_tx.clone();
            let payload = item.to_entry_payload();
            tokio::spawn(async move {
                let result = cart_client.create_cart_entry(payload).await;
                let _ = events.send(StoreEvent::CartEntryCreated { result, respond_to });
            });
        }
    }

    #[instrument(skip(self, result, respond_to))]
    fn handle_cart_entry_created(
        &mut self,
        result: Result<CartEntry, ResourceError>,
        respond_to: StoreResponse<CartToggle>,
    ) {
        match result {
            Ok(entry) => {
                info!(entry_id = ?entry.id, parent_id = %entry.parent_id, "Cart entry created");
                self.state.cart_items.push(entry.clone());
                self.publish();
                let _ = respond_to.send(Ok(CartToggle::Added(entry)));
            }
            Err(e) => {
                error!(error = %e, "Cart entry creation failed");
                self.notifier.alert(CART_TOGGLE_ALERT);
                let _ = respond_to.send(Err(StoreError::CartToggleFailed(e.to_string())));
            }
        }
    }

    /// Drops the entry locally and asks the backend to delete it without
    /// waiting for the outcome.
    #[instrument(fields(entry_id = %id), skip(self, id, respond_to))]
    fn handle_remove_cart_item(&mut self, id: EntityId, respond_to: StoreResponse<()>) {
        let cart_client = self.cart_client.clone();
        let remote_id = id.clone();
        tokio::spawn(async move {
            if let Err(e) = cart_client.delete_cart_entry(remote_id).await {
                warn!(error = %e, "Cart entry deletion failed");
            }
        });

        self.state.remove_cart_entry(&id);
        self.publish();
        let _ = respond_to.send(Ok(()));
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    /// Toggles a favorite.
    ///
    /// The lookup matches `item.id` against favorite ids exactly, so a catalog
    /// item only finds its favorite while that favorite still carries the
    /// catalog id. Adding inserts a pending entry right away; the backend id is
    /// filled in when the creation response arrives. Failures are not reported.
    #[instrument(fields(catalog_id = %item.id), skip(self, item, respond_to))]
    fn handle_add_favorite(&mut self, item: CatalogItem, respond_to: StoreResponse<()>) {
        if self.state.has_favorite_id(&item.id) {
            debug!("Favorite exists, removing");
            let favorite_client = self.favorite_client.clone();
            let remote_id = item.id.clone();
            tokio::spawn(async move {
                if let Err(e) = favorite_client.delete_favorite(remote_id).await {
                    warn!(error = %e, "Favorite deletion failed");
                }
            });
            self.state.remove_favorite(&item.id);
        } else {
            debug!("Adding pending favorite");
            let payload = item.to_entry_payload();
            self.state.favorites.push(FavoriteEntry::pending(&payload));

            let favorite_client = self.favorite_client.clone();
            let events = self.events_tx.clone();
            tokio::spawn(async move {
                let result = favorite_client.create_favorite(payload).await;
                let _ = events.send(StoreEvent::FavoriteCreated(result));
            });
        }

        self.publish();
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, result))]
    fn handle_favorite_created(&mut self, result: Result<FavoriteEntry, ResourceError>) {
        match result {
            Ok(confirmed) => {
                let count = self.state.confirm_favorite(&confirmed);
                if count == 0 {
                    debug!(parent_id = ?confirmed.parent_id, "No pending favorite left to confirm");
                } else {
                    info!(entry_id = %confirmed.id, parent_id = ?confirmed.parent_id, "Favorite confirmed");
                    self.publish();
                }
            }
            Err(e) => {
                debug!(error = %e, "Favorite creation failed, keeping pending entry");
            }
        }
    }
}
