use std::time::Duration;
use tracing::{info, instrument, warn};
use crate::app_system::StoreError;
use crate::clients::StoreClient;
use crate::domain::{CartToggle, CatalogItem, EntityId, FavoriteEntry};

const FAVORITE_CONFIRM_TIMEOUT: Duration = Duration::from_secs(5);

/// What the walkthrough did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoReport {
    /// Catalog item the walkthrough ran on; `None` for an empty catalog.
    pub item: Option<EntityId>,
    pub visible_after_search: usize,
    pub cart_toggles: usize,
    /// Backend id the favorite was confirmed under.
    pub favorite_id: Option<EntityId>,
    pub in_cart_after: bool,
}

/// Runs every store operation against the first catalog item and puts the
/// cart and favorites back the way they were.
#[instrument(skip(store))]
pub async fn run_demo(store: &StoreClient) -> Result<DemoReport, StoreError> {
    let state = store.snapshot().await?;
    let Some(item) = state.visible_items().first().map(|item| (*item).clone()) else {
        info!("Catalog is empty, nothing to walk through");
        return Ok(DemoReport::default());
    };

    let mut report = DemoReport {
        item: Some(item.id.clone()),
        ..Default::default()
    };

    store.set_search_value(item.title.clone()).await?;
    report.visible_after_search = store.snapshot().await?.visible_items().len();
    info!(search = %item.title, visible = report.visible_after_search, "Search applied");

    match store.add_to_cart(item.clone()).await? {
        CartToggle::Added(entry) => {
            report.cart_toggles += 1;
            let in_cart = store.is_item_added(item.id.clone()).await?;
            info!(entry_id = ?entry.id, in_cart, "Added to cart");
            match entry.id {
                Some(id) => store.remove_cart_item(id).await?,
                None => warn!("Cart entry came back without an id, leaving it"),
            }
        }
        CartToggle::Removed(entry) => {
            report.cart_toggles += 1;
            info!(parent_id = %entry.parent_id, "Item was already in the cart, putting it back");
            store.add_to_cart(CatalogItem::from(&entry)).await?;
            report.cart_toggles += 1;
        }
    }

    if state.is_favorite(&item.id) {
        info!("Item is already a favorite, leaving favorites alone");
    } else {
        store.add_favorite(item.clone()).await?;
        match wait_for_confirmed_favorite(store, &item.id).await {
            Some(favorite) => {
                info!(favorite_id = %favorite.id, "Favorite confirmed, removing it again");
                store.add_favorite(CatalogItem::from(&favorite)).await?;
                report.favorite_id = Some(favorite.id);
            }
            None => warn!("Favorite not confirmed in time, leaving it pending"),
        }
    }

    report.in_cart_after = store.is_item_added(item.id.clone()).await?;
    store.set_search_value(String::new()).await?;
    Ok(report)
}

async fn wait_for_confirmed_favorite(store: &StoreClient, catalog_id: &EntityId) -> Option<FavoriteEntry> {
    let mut snapshots = store.subscribe();
    let confirmed = tokio::time::timeout(
        FAVORITE_CONFIRM_TIMEOUT,
        snapshots.wait_for(|state| state.confirmed_favorite_for(catalog_id).is_some()),
    )
    .await;

    let favorite = match confirmed {
        Ok(Ok(state)) => state.confirmed_favorite_for(catalog_id).cloned(),
        _ => None,
    };
    favorite
}
