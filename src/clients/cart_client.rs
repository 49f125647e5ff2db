use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient, WeakResourceClient};
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::domain::{Cart, CartSnapshot, Item, ItemId, OrderSubmission, SessionId};

/// Client for interacting with one session's cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl From<FrameworkError<CartError>> for CartError {
    fn from(error: FrameworkError<CartError>) -> Self {
        match error {
            FrameworkError::Entity(e) => e,
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl_action_methods!(CartClient, CartAction => CartActionResult, CartError, {
    add_item(item: Item) -> u32 => AddItem(item);
    remove_item(item_id: ItemId) -> bool => RemoveItem(item_id);
    update_quantity(item_id: ItemId, quantity: u32) -> bool => UpdateQuantity(item_id, quantity);
    increment(item_id: ItemId) -> Option<u32> => Increment(item_id);
    decrement(item_id: ItemId) -> Option<u32> => Decrement(item_id);
    get_total() -> Decimal => GetTotal;
    checkout() -> OrderSubmission => Checkout;
    complete_checkout() -> OrderSubmission => CompleteCheckout;
});

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    pub fn session_id(&self) -> &SessionId {
        self.inner.id()
    }

    #[instrument(skip(self), fields(session_id = %self.session_id()))]
    pub async fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        debug!("Sending request");
        Ok(self.inner.snapshot().await?)
    }

    /// Read-only feed of snapshots for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.subscribe()
    }

    /// A handle for bookkeeping that lets the cart actor stop once the
    /// session's own clients are gone.
    pub fn downgrade(&self) -> WeakCartClient {
        WeakCartClient {
            inner: self.inner.downgrade(),
        }
    }

    #[instrument(skip(self), fields(session_id = %self.session_id()))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown");
        Ok(self.inner.shutdown().await?)
    }
}

/// Non-owning cart handle, see [`CartClient::downgrade`].
#[derive(Clone)]
pub struct WeakCartClient {
    inner: WeakResourceClient<Cart>,
}

impl WeakCartClient {
    pub fn session_id(&self) -> &SessionId {
        self.inner.id()
    }

    pub fn upgrade(&self) -> Option<CartClient> {
        self.inner.upgrade().map(CartClient::new)
    }
}
