//! One browsing session: the user input surface over a cart actor and the
//! checkout flow.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::cart_actor::CartError;
use crate::checkout::{CheckoutError, CheckoutEvent, CheckoutFlow, CheckoutState};
use crate::clients::CartClient;
use crate::domain::{
    CartSnapshot, Catalog, ItemId, OrderSubmission, PaymentDetails, PaymentReceipt, SessionId,
};
use crate::error::StoreResult;

/// Parses a quantity typed by the shopper. Negative and non-integer input is
/// rejected before it reaches the cart.
pub fn parse_quantity(input: &str) -> Result<u32, CartError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| CartError::InvalidQuantity(format!("not a whole number: {trimmed:?}")))?;
    quantity_from_signed(value)
}

fn quantity_from_signed(value: i64) -> Result<u32, CartError> {
    if value < 0 {
        return Err(CartError::InvalidQuantity(format!("negative quantity: {value}")));
    }
    u32::try_from(value).map_err(|_| CartError::InvalidQuantity(format!("quantity too large: {value}")))
}

/// The discrete actions a shopper can take, each run to completion before the next.
pub struct StoreSession {
    cart: CartClient,
    catalog: Arc<Catalog>,
    flow: CheckoutFlow,
}

impl StoreSession {
    pub fn new(cart: CartClient, catalog: Arc<Catalog>) -> Self {
        Self {
            cart,
            catalog,
            flow: CheckoutFlow::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        self.cart.session_id()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> CheckoutState {
        self.flow.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.cart.subscribe()
    }

    pub async fn snapshot(&self) -> StoreResult<CartSnapshot> {
        Ok(self.cart.snapshot().await?)
    }

    pub async fn total(&self) -> StoreResult<Decimal> {
        Ok(self.cart.get_total().await?)
    }

    /// What the payment form would charge right now. Built from the live cart
    /// on every call, so edits made on the payment screen show up in the
    /// "Pay" amount. `None` outside `PaymentEntry`.
    pub async fn payment_preview(&self) -> StoreResult<Option<OrderSubmission>> {
        if self.flow.state() != CheckoutState::PaymentEntry {
            return Ok(None);
        }
        Ok(Some(self.cart.checkout().await?))
    }

    // --- Cart actions ---

    /// "Add to Cart" on a catalog card. Returns the line's new quantity.
    #[instrument(skip(self), fields(session_id = %self.session_id()))]
    pub async fn select_item(&mut self, item_id: ItemId) -> StoreResult<u32> {
        let item = self
            .catalog
            .get(item_id)
            .ok_or(CartError::UnknownItem(item_id))?;
        if !item.is_available() {
            warn!(%item_id, "Out of stock item selected");
        }
        Ok(self.cart.add_item(item.clone()).await?)
    }

    pub async fn remove_line(&mut self, item_id: ItemId) -> StoreResult<bool> {
        Ok(self.cart.remove_item(item_id).await?)
    }

    pub async fn increment(&mut self, item_id: ItemId) -> StoreResult<Option<u32>> {
        Ok(self.cart.increment(item_id).await?)
    }

    pub async fn decrement(&mut self, item_id: ItemId) -> StoreResult<Option<u32>> {
        Ok(self.cart.decrement(item_id).await?)
    }

    /// Sets a line's quantity from a signed value; zero removes the line.
    #[instrument(skip(self), fields(session_id = %self.session_id()))]
    pub async fn set_quantity(&mut self, item_id: ItemId, quantity: i64) -> StoreResult<bool> {
        let quantity = quantity_from_signed(quantity)?;
        Ok(self.cart.update_quantity(item_id, quantity).await?)
    }

    /// Sets a line's quantity from raw text input.
    #[instrument(skip(self), fields(session_id = %self.session_id()))]
    pub async fn set_quantity_input(&mut self, item_id: ItemId, input: &str) -> StoreResult<bool> {
        let quantity = parse_quantity(input)?;
        Ok(self.cart.update_quantity(item_id, quantity).await?)
    }

    // --- Checkout flow ---

    pub fn open_cart(&mut self) -> StoreResult<CheckoutState> {
        Ok(self.flow.apply(CheckoutEvent::OpenCart)?)
    }

    pub fn close_cart(&mut self) -> StoreResult<CheckoutState> {
        Ok(self.flow.apply(CheckoutEvent::CloseCart)?)
    }

    /// The header's cart button: opens the cart while browsing, closes it while reviewing.
    pub fn toggle_cart(&mut self) -> StoreResult<CheckoutState> {
        match self.flow.state() {
            CheckoutState::CartReview => self.close_cart(),
            _ => self.open_cart(),
        }
    }

    /// "Checkout" in the cart view. Refuses an empty cart.
    #[instrument(skip(self), fields(session_id = %self.session_id()))]
    pub async fn proceed_to_payment(&mut self) -> StoreResult<OrderSubmission> {
        self.flow.peek(CheckoutEvent::ProceedToPayment)?;
        let submission = self.cart.checkout().await?;
        if submission.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        self.flow.apply(CheckoutEvent::ProceedToPayment)?;
        Ok(submission)
    }

    /// "Pay" on the payment form. The details are accepted as-is; the cart is
    /// cleared in one step and the flow returns to browsing.
    #[instrument(skip(self, details), fields(session_id = %self.session_id()))]
    pub async fn submit_payment(&mut self, details: PaymentDetails) -> StoreResult<PaymentReceipt> {
        self.flow.peek(CheckoutEvent::SubmitPayment)?;
        let submission = self.cart.complete_checkout().await?;
        self.flow.apply(CheckoutEvent::SubmitPayment)?;

        info!(
            card_holder = %details.card_holder,
            total = %submission.total(),
            units = submission.unit_count(),
            "Payment accepted"
        );
        Ok(PaymentReceipt::new(submission))
    }

    /// "Cancel" on the payment form. The cart is left as it was.
    pub fn cancel_payment(&mut self) -> StoreResult<CheckoutState> {
        Ok(self.flow.apply(CheckoutEvent::CancelPayment)?)
    }

    /// Stops this session's cart actor.
    pub async fn close(self) -> StoreResult<()> {
        Ok(self.cart.shutdown().await?)
    }
}
