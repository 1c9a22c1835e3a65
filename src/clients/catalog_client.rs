use crate::actor_framework::{Resource, ResourceClient};
use crate::domain::CatalogItem;

impl Resource for CatalogItem {
    type CreatePayload = CatalogItem;

    const PATH: &'static str = "items";
}

/// Read-only access to the catalog collection of the items backend.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<CatalogItem>,
}

impl_client_new!(CatalogClient, CatalogItem);
impl_list_method!(CatalogClient, CatalogItem, items);
