//! Typed handles for the backend collections and for the store actor.

#[macro_use]
mod macros;

mod catalog_client;
mod cart_client;
mod favorite_client;
mod store_client;

pub use catalog_client::CatalogClient;
pub use cart_client::CartClient;
pub use favorite_client::FavoriteClient;
pub use store_client::StoreClient;
