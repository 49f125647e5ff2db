use tracing::{debug, info};

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::actor_framework::Entity;
use crate::domain::{Cart, CartSnapshot, SessionId};

impl Entity for Cart {
    type Id = SessionId;
    type Snapshot = CartSnapshot;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Error = CartError;

    fn id(&self) -> &SessionId {
        self.session_id()
    }

    fn snapshot(&self) -> CartSnapshot {
        Cart::snapshot(self)
    }

    /// Handles cart actions.
    ///
    /// # Actions
    /// - `AddItem(item)`: one more unit of `item`
    /// - `RemoveItem(id)`: drops the line, no-op if absent
    /// - `UpdateQuantity(id, n)`: absolute set, `0` removes
    /// - `Increment(id)` / `Decrement(id)`: relative change read and written in one step
    /// - `GetTotal`: fresh total
    /// - `Checkout` / `CompleteCheckout`: order submission, the latter also clears
    ///
    /// # Errors
    /// Returns [`CartError::ItemUnavailable`] when adding an out-of-stock item and
    /// [`CartError::InvalidQuantity`] when a line would overflow.
    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddItem(item) => {
                let quantity = self.add_item(&item)?;
                debug!(item_id = %item.id(), quantity, "Item added");
                Ok(CartActionResult::AddItem(quantity))
            }
            CartAction::RemoveItem(item_id) => {
                let removed = self.remove_item(item_id).is_some();
                if !removed {
                    debug!(%item_id, "Line not found, nothing to remove");
                }
                Ok(CartActionResult::RemoveItem(removed))
            }
            CartAction::UpdateQuantity(item_id, quantity) => {
                let found = self.update_quantity(item_id, quantity);
                if !found {
                    debug!(%item_id, quantity, "Line not found, quantity unchanged");
                }
                Ok(CartActionResult::UpdateQuantity(found))
            }
            CartAction::Increment(item_id) => {
                let quantity = self.increment(item_id)?;
                if quantity.is_none() {
                    debug!(%item_id, "Line not found, nothing to increment");
                }
                Ok(CartActionResult::Increment(quantity))
            }
            CartAction::Decrement(item_id) => {
                let quantity = self.decrement(item_id);
                if quantity.is_none() {
                    debug!(%item_id, "Line not found, nothing to decrement");
                }
                Ok(CartActionResult::Decrement(quantity))
            }
            CartAction::GetTotal => Ok(CartActionResult::GetTotal(self.total())),
            CartAction::Checkout => Ok(CartActionResult::Checkout(self.checkout())),
            CartAction::CompleteCheckout => {
                let submission = self.complete_checkout();
                info!(total = %submission.total(), lines = submission.lines.len(), "Cart cleared after checkout");
                Ok(CartActionResult::CompleteCheckout(submission))
            }
        }
    }
}
