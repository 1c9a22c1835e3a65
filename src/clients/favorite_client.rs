use crate::actor_framework::{Resource, ResourceClient};
use crate::domain::{CatalogItem, FavoriteEntry};

impl Resource for FavoriteEntry {
    type CreatePayload = CatalogItem;

    const PATH: &'static str = "favorite";
}

/// Client for the favorites backend.
#[derive(Clone)]
pub struct FavoriteClient {
    inner: ResourceClient<FavoriteEntry>,
}

impl_basic_client!(FavoriteClient, FavoriteEntry, favorites, favorite);
