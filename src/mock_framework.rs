//! # Mock Framework
//!
//! Utilities for driving the store actor without real backends.
//!
//! Use [`create_mock_client`] to get a resource client and the receiver its
//! requests land on. Then use [`expect_list`], [`expect_create`] or
//! [`expect_delete`] to assert each request and answer it, in whatever order
//! the test needs.

use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use crate::actor_framework::{Resource, ResourceClient, ResourceRequest};
use crate::app_system::ResourceError;
use crate::domain::EntityId;
use crate::store_actor::Notifier;

pub type Responder<T> = oneshot::Sender<Result<T, ResourceError>>;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Resource>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(EntityId, Responder<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Notifier that remembers every alert.
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|alerts| alerts.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CartClient;
    use crate::domain::{CartEntry, CatalogItem};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<CartEntry>(10);
        let client = CartClient::new(inner);

        let create_task = tokio::spawn(async move {
            let item = CatalogItem::new(7, "Test", 10.0, "/t.jpg").to_entry_payload();
            client.create_cart_entry(item).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.title, "Test");
        let entry = CartEntry {
            id: Some(EntityId::from("1")),
            parent_id: payload.id.clone(),
            title: payload.title.clone(),
            price: payload.price,
            image_url: payload.image_url.clone(),
        };
        responder.send(Ok(entry.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(entry));
    }

    #[tokio::test]
    async fn test_closed_receiver_is_a_communication_error() {
        let (inner, receiver) = create_mock_client::<CartEntry>(10);
        drop(receiver);
        let client = CartClient::new(inner);

        let result = client.delete_cart_entry(EntityId::from(3)).await;
        assert!(matches!(result, Err(ResourceError::ActorCommunicationError(_))));
    }
}
