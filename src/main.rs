mod domain;
mod clients;
mod store_actor;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;

use tracing::{error, info, Instrument};
use crate::app_system::{run_demo, setup_tracing, Config, StoreSystem, SystemError};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront synchronizer");

    let config = Config::from_env()?;
    let system = StoreSystem::new(&config)?;

    let span = tracing::info_span!("initial_load");
    let state = async {
        info!("Waiting for cart, favorites and catalog");
        system.store_client.wait_until_loaded().await
    }
    .instrument(span)
    .await?;

    info!(
        items = state.items.len(),
        cart_items = state.cart_items.len(),
        favorites = state.favorites.len(),
        cart_total = state.cart_total(),
        "Storefront ready"
    );

    let span = tracing::info_span!("storefront_walkthrough");
    let report = async {
        info!("Toggling cart and favorites on the first catalog item");
        run_demo(&system.store_client).await
    }
    .instrument(span)
    .await;

    match report {
        Ok(report) => info!(
            item = ?report.item,
            visible = report.visible_after_search,
            cart_toggles = report.cart_toggles,
            favorite_id = ?report.favorite_id,
            in_cart = report.in_cart_after,
            "Walkthrough complete"
        ),
        Err(e) => error!(error = %e, "Walkthrough failed"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
