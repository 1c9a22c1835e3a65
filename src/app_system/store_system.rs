use std::sync::Arc;
use tracing::{error, info};
use crate::actor_framework::HttpResourceActor;
use crate::app_system::{Config, SystemError};
use crate::clients::{CartClient, CatalogClient, FavoriteClient, StoreClient};
use crate::domain::{CartEntry, CatalogItem, FavoriteEntry};
use crate::store_actor::{Notifier, StoreService, TracingNotifier};

/// The running synchronizer: one HTTP actor per backend collection plus the
/// store actor that owns the state.
pub struct StoreSystem {
    pub store_client: StoreClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new(config: &Config) -> Result<Self, SystemError> {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self, SystemError> {
        info!(
            sneakers_api = %config.sneakers_api,
            favorite_api = %config.favorite_api,
            "Starting store system"
        );
        let http = reqwest::Client::builder().build()?;
        let buffer = config.channel_buffer;

        // 1. Items backend: catalog and cart collections
        let (catalog_actor, catalog_inner) =
            HttpResourceActor::<CatalogItem>::new(buffer, http.clone(), &config.sneakers_api)?;
        let (cart_actor, cart_inner) =
            HttpResourceActor::<CartEntry>::new(buffer, http.clone(), &config.sneakers_api)?;

        // 2. Favorites backend
        let (favorite_actor, favorite_inner) =
            HttpResourceActor::<FavoriteEntry>::new(buffer, http, &config.favorite_api)?;

        // 3. Store actor, wired to the three collections
        let (store_service, store_client) = StoreService::new(
            buffer,
            CatalogClient::new(catalog_inner),
            CartClient::new(cart_inner),
            FavoriteClient::new(favorite_inner),
            notifier,
        );

        let handles = vec![
            tokio::spawn(catalog_actor.run()),
            tokio::spawn(cart_actor.run()),
            tokio::spawn(favorite_actor.run()),
            tokio::spawn(store_service.run()),
        ];

        Ok(Self {
            store_client,
            handles,
        })
    }

    /// Stops the store actor; the HTTP actors follow once their last client
    /// is gone and in-flight requests have finished.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        self.store_client.shutdown().await?;
        drop(self.store_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
