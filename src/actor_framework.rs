use std::fmt::Debug;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};
use url::Url;
use crate::domain::EntityId;
use crate::app_system::ResourceError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A record type that lives in a remote REST collection.
pub trait Resource: Clone + Send + Sync + Debug + DeserializeOwned + 'static {
    /// Body sent with a creation request.
    type CreatePayload: Serialize + Send + Sync + Debug + 'static;

    /// Collection path relative to the backend base URL.
    const PATH: &'static str;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ResourceError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Resource> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Delete {
        id: EntityId,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE HTTP ACTOR
// =============================================================================

/// Serves [`ResourceRequest`]s for one collection over HTTP.
///
/// Every request runs in its own task, so a slow call never holds up the others.
pub struct HttpResourceActor<T: Resource> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    http: reqwest::Client,
    collection_url: Url,
}

impl<T: Resource> HttpResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        http: reqwest::Client,
        base_url: &Url,
    ) -> Result<(Self, ResourceClient<T>), ResourceError> {
        let collection_url = join_path(base_url, &[T::PATH])?;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            http,
            collection_url,
        };
        Ok((actor, ResourceClient::new(sender)))
    }

    #[instrument(name = "resource_actor", fields(collection = T::PATH), skip(self))]
    pub async fn run(mut self) {
        info!(url = %self.collection_url, "Resource actor starting");
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => {
                        let http = self.http.clone();
                        let url = self.collection_url.clone();
                        in_flight.spawn(handle_request(http, url, msg));
                    }
                    None => break,
                },
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        while in_flight.join_next().await.is_some() {}
        info!("Resource actor stopped");
    }
}

async fn handle_request<T: Resource>(http: reqwest::Client, url: Url, msg: ResourceRequest<T>) {
    match msg {
        ResourceRequest::List { respond_to } => {
            let _ = respond_to.send(list(&http, url).await);
        }
        ResourceRequest::Create { payload, respond_to } => {
            let _ = respond_to.send(create(&http, url, &payload).await);
        }
        ResourceRequest::Delete { id, respond_to } => {
            let result = match join_path(&url, &[&id.to_string()]) {
                Ok(url) => delete(&http, url).await,
                Err(e) => Err(e),
            };
            let _ = respond_to.send(result);
        }
    }
}

async fn list<T: Resource>(http: &reqwest::Client, url: Url) -> Result<Vec<T>, ResourceError> {
    debug!(%url, "GET");
    let response = http.get(url.clone()).send().await?;
    let body = checked_body(response, &url).await?;
    decode_list(&body)
}

async fn create<T: Resource>(
    http: &reqwest::Client,
    url: Url,
    payload: &T::CreatePayload,
) -> Result<T, ResourceError> {
    debug!(%url, "POST");
    let response = http.post(url.clone()).json(payload).send().await?;
    let body = checked_body(response, &url).await?;
    serde_json::from_slice(&body).map_err(|e| ResourceError::Decode(e.to_string()))
}

async fn delete(http: &reqwest::Client, url: Url) -> Result<(), ResourceError> {
    debug!(%url, "DELETE");
    let response = http.delete(url.clone()).send().await?;
    checked_body(response, &url).await.map(|_| ())
}

async fn checked_body(response: reqwest::Response, url: &Url) -> Result<Vec<u8>, ResourceError> {
    let status = response.status();
    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "Backend rejected request");
        return Err(ResourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

/// Decodes a collection body. Anything that is not a JSON array counts as an
/// empty collection; an array holding malformed records is an error.
pub fn decode_list<T: Resource>(body: &[u8]) -> Result<Vec<T>, ResourceError> {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(records)) => serde_json::from_value(serde_json::Value::Array(records))
            .map_err(|e| ResourceError::Decode(e.to_string())),
        _ => Ok(Vec::new()),
    }
}

/// Appends path segments to `base`, keeping any path the base already has.
pub fn join_path(base: &Url, segments: &[&str]) -> Result<Url, ResourceError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ResourceError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Resource> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, ResourceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::List { respond_to })
            .await.map_err(|_| ResourceError::ActorCommunicationError("Actor closed".to_string()))?;
        response.await.map_err(|_| ResourceError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, ResourceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Create { payload, respond_to })
            .await.map_err(|_| ResourceError::ActorCommunicationError("Actor closed".to_string()))?;
        response.await.map_err(|_| ResourceError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ResourceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Delete { id, respond_to })
            .await.map_err(|_| ResourceError::ActorCommunicationError("Actor closed".to_string()))?;
        response.await.map_err(|_| ResourceError::ActorCommunicationError("Actor dropped".to_string()))?
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use crate::domain::{CartEntry, CatalogItem, FavoriteEntry};

    /// Request line and body as the backend received them.
    type Received = (String, String);

    /// Serves one canned `(status, body)` reply per connection, in order, and
    /// reports every request it saw.
    async fn start_backend(replies: Vec<(u16, &'static str)>) -> (Url, mpsc::UnboundedReceiver<Received>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (seen_tx, seen_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in replies {
                let (mut socket, _) = listener.accept().await.unwrap();
                let received = read_request(&mut socket).await;
                let _ = seen_tx.send(received);

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        let base = Url::parse(&format!("http://{}/api", addr)).unwrap();
        (base, seen_rx)
    }

    async fn read_request(socket: &mut TcpStream) -> Received {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let head_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request head");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < head_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let request_line = head.lines().next().unwrap_or_default().to_string();
        let body = String::from_utf8_lossy(&buf[head_end..head_end + content_length]).to_string();
        (request_line, body)
    }

    fn start_actor<T: Resource>(base: &Url) -> ResourceClient<T> {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let (actor, client) = HttpResourceActor::<T>::new(8, http, base).unwrap();
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_lists_catalog_over_http() {
        let (base, mut seen) = start_backend(vec![(
            200,
            r#"[{"id":"1","title":"Nike Blazer Mid","price":120,"imageUrl":"/1.jpg"}]"#,
        )])
        .await;
        let client = start_actor::<CatalogItem>(&base);

        let items = client.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, EntityId::from("1"));
        assert_eq!(items[0].price, 120.0);

        let (request_line, _) = seen.recv().await.unwrap();
        assert_eq!(request_line, "GET /api/items HTTP/1.1");
    }

    #[tokio::test]
    async fn test_cart_verbs_over_http() {
        let (base, mut seen) = start_backend(vec![
            (200, r#"[{"id":"30","parentId":"7","title":"Vans","price":60,"imageUrl":"/7.jpg"}]"#),
            (201, r#"{"id":"31","parentId":7,"title":"Vans","price":60,"imageUrl":"/7.jpg"}"#),
            (200, ""),
        ])
        .await;
        let client = start_actor::<CartEntry>(&base);

        let entries = client.list().await.unwrap();
        assert_eq!(entries[0].id, Some(EntityId::from("30")));
        let (request_line, _) = seen.recv().await.unwrap();
        assert_eq!(request_line, "GET /api/cart HTTP/1.1");

        let payload = CatalogItem::new(7, "Vans", 60.0, "/7.jpg").to_entry_payload();
        let created = client.create(payload).await.unwrap();
        assert_eq!(created.id, Some(EntityId::from("31")));
        assert_eq!(created.parent_id, EntityId::from(7));
        let (request_line, body) = seen.recv().await.unwrap();
        assert_eq!(request_line, "POST /api/cart HTTP/1.1");
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["parentId"], 7);
        assert_eq!(sent["title"], "Vans");

        client.delete(EntityId::from("31")).await.unwrap();
        let (request_line, _) = seen.recv().await.unwrap();
        assert_eq!(request_line, "DELETE /api/cart/31 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_favorite_paths_and_plain_text_body() {
        let (base, mut seen) = start_backend(vec![
            (200, "Not found"),
            (200, r#"{"id":"55","parentId":3,"title":"Puma","price":80,"imageUrl":"/3.jpg"}"#),
            (200, ""),
        ])
        .await;
        let client = start_actor::<FavoriteEntry>(&base);

        let favorites = client.list().await.unwrap();
        assert!(favorites.is_empty());
        assert_eq!(seen.recv().await.unwrap().0, "GET /api/favorite HTTP/1.1");

        let payload = CatalogItem::new(3, "Puma", 80.0, "/3.jpg").to_entry_payload();
        let created = client.create(payload).await.unwrap();
        assert_eq!(created.id, EntityId::from("55"));
        assert!(!created.is_pending());
        assert_eq!(seen.recv().await.unwrap().0, "POST /api/favorite HTTP/1.1");

        client.delete(EntityId::from(3)).await.unwrap();
        assert_eq!(seen.recv().await.unwrap().0, "DELETE /api/favorite/3 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, mut seen) = start_backend(vec![(500, "boom"), (404, "")]).await;
        let client = start_actor::<CartEntry>(&base);

        let listed = client.list().await;
        match listed {
            Err(ResourceError::Status { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/api/cart"));
            }
            other => panic!("expected a status error, got {:?}", other),
        }
        assert_eq!(seen.recv().await.unwrap().0, "GET /api/cart HTTP/1.1");

        let deleted = client.delete(EntityId::from(9)).await;
        assert!(matches!(deleted, Err(ResourceError::Status { status: 404, .. })));
        assert_eq!(seen.recv().await.unwrap().0, "DELETE /api/cart/9 HTTP/1.1");
    }

    #[test]
    fn test_join_path_keeps_base_path() {
        let base = Url::parse("https://example.mockapi.io/api/v1").unwrap();
        let url = join_path(&base, &["cart"]).unwrap();
        assert_eq!(url.as_str(), "https://example.mockapi.io/api/v1/cart");

        let with_slash = Url::parse("https://example.mockapi.io/api/v1/").unwrap();
        let url = join_path(&with_slash, &["cart", "12"]).unwrap();
        assert_eq!(url.as_str(), "https://example.mockapi.io/api/v1/cart/12");
    }

    #[test]
    fn test_join_path_on_bare_host() {
        let base = Url::parse("http://localhost:3000").unwrap();
        let url = join_path(&base, &["favorite"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/favorite");
    }

    #[test]
    fn test_decode_list_accepts_arrays() {
        let items: Vec<CatalogItem> =
            decode_list(br#"[{"id":"1","title":"A","price":10,"imageUrl":"/a.jpg"}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A");
    }

    #[test]
    fn test_decode_list_treats_non_arrays_as_empty() {
        let from_object: Vec<CartEntry> = decode_list(br#"{"error":"not found"}"#).unwrap();
        assert!(from_object.is_empty());

        let from_text: Vec<CartEntry> = decode_list(b"Not found").unwrap();
        assert!(from_text.is_empty());
    }

    #[test]
    fn test_decode_list_rejects_malformed_records() {
        let result: Result<Vec<CartEntry>, _> = decode_list(br#"[{"id":"1"}]"#);
        assert!(matches!(result, Err(ResourceError::Decode(_))));
    }
}
