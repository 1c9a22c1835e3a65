use crate::actor_framework::{Resource, ResourceClient};
use crate::domain::{CartEntry, CatalogItem};

impl Resource for CartEntry {
    type CreatePayload = CatalogItem;

    const PATH: &'static str = "cart";
}

/// Client for the cart collection of the items backend.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartEntry>,
}

impl_basic_client!(CartClient, CartEntry, cart_entries, cart_entry);
