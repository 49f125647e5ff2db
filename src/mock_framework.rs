//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_action`] or [`expect_snapshot`] to assert behavior.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot, watch};

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Client logic (e.g. `CartClient::increment`) is tested without spinning up a
/// `ResourceActor`: the client sends into a channel we control, we inspect each
/// request and answer it by hand. The returned `watch::Sender` stands in for the
/// actor's snapshot publisher.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
    entity: &T,
) -> (
    ResourceClient<T>,
    mpsc::Receiver<ResourceRequest<T>>,
    watch::Sender<T::Snapshot>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (publisher, snapshots) = watch::channel(entity.snapshot());
    (
        ResourceClient::new(entity.id().clone(), sender, snapshots),
        receiver,
        publisher,
    )
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<T::Snapshot, T::Error>>> {
    match receiver.recv().await {
        Some(ResourceRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Action, oneshot::Sender<Result<T::ActionResult, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Shutdown request
pub async fn expect_shutdown<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> bool {
    matches!(receiver.recv().await, Some(ResourceRequest::Shutdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartAction, CartActionResult, CartError};
    use crate::clients::CartClient;
    use crate::domain::{Cart, Catalog, ItemId, SessionId};

    fn empty_cart() -> Cart {
        Cart::new(SessionId::new("session_mock"))
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver, _publisher) = create_mock_client(10, &empty_cart());
        let client = CartClient::new(inner);
        let monstera = Catalog::plants().get(ItemId(1)).unwrap().clone();

        let add_task = tokio::spawn(async move { client.add_item(monstera).await });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        match action {
            CartAction::AddItem(item) => assert_eq!(item.id(), ItemId(1)),
            other => panic!("Unexpected action: {other:?}"),
        }
        responder.send(Ok(CartActionResult::AddItem(1))).unwrap();

        assert_eq!(add_task.await.unwrap(), Ok(1));
    }

    #[tokio::test]
    async fn test_mismatched_result_is_a_communication_error() {
        let (inner, mut receiver, _publisher) = create_mock_client(10, &empty_cart());
        let client = CartClient::new(inner);

        let total_task = tokio::spawn(async move { client.get_total().await });

        let (_, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        responder.send(Ok(CartActionResult::RemoveItem(false))).unwrap();

        assert!(matches!(
            total_task.await.unwrap(),
            Err(CartError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_entity_errors_pass_through() {
        let (inner, mut receiver, _publisher) = create_mock_client(10, &empty_cart());
        let client = CartClient::new(inner);
        let fig = Catalog::plants().get(ItemId(3)).unwrap().clone();

        let add_task = tokio::spawn(async move { client.add_item(fig).await });

        let (_, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        responder.send(Err(CartError::ItemUnavailable(ItemId(3)))).unwrap();

        assert_eq!(add_task.await.unwrap(), Err(CartError::ItemUnavailable(ItemId(3))));
    }

    #[tokio::test]
    async fn test_decrement_is_one_action() {
        let (inner, mut receiver, _publisher) = create_mock_client(10, &empty_cart());
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move { client.decrement(ItemId(2)).await });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        match action {
            CartAction::Decrement(item_id) => assert_eq!(item_id, ItemId(2)),
            other => panic!("Unexpected action: {other:?}"),
        }
        responder.send(Ok(CartActionResult::Decrement(Some(0)))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(Some(0)));
        // Client dropped with the task: nothing else was sent.
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_increment_missing_line() {
        let (inner, mut receiver, _publisher) = create_mock_client(10, &empty_cart());
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move {
            let result = client.increment(ItemId(4)).await;
            client.shutdown().await.unwrap();
            result
        });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert!(matches!(action, CartAction::Increment(ItemId(4))));
        responder.send(Ok(CartActionResult::Increment(None))).unwrap();
        assert!(expect_shutdown(&mut receiver).await);

        assert_eq!(task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_snapshot_request() {
        let catalog = Catalog::plants();
        let mut cart = empty_cart();
        cart.add_item(catalog.get(ItemId(2)).unwrap()).unwrap();
        let snapshot = cart.snapshot();

        let (inner, mut receiver, _publisher) = create_mock_client(10, &cart);
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move { client.snapshot().await });

        let responder = expect_snapshot(&mut receiver).await.expect("Expected Snapshot request");
        responder.send(Ok(snapshot.clone())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(snapshot));
    }

    #[tokio::test]
    async fn test_dropped_actor_maps_to_communication_error() {
        let (inner, receiver, _publisher) = create_mock_client(10, &empty_cart());
        let client = CartClient::new(inner);
        drop(receiver);

        assert!(matches!(
            client.get_total().await,
            Err(CartError::ActorCommunicationError(_))
        ));
    }
}
