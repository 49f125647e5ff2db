use rust_decimal::Decimal;

use crate::domain::{Item, ItemId, OrderSubmission};

/// Operations a session can perform on its cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of the item, or starts a new line.
    ///
    /// # Errors
    /// Rejected if the item is out of stock.
    AddItem(Item),
    /// Drops the line for the item, if there is one.
    RemoveItem(ItemId),
    /// Sets an absolute quantity; zero removes the line.
    UpdateQuantity(ItemId, u32),
    /// One more unit of an existing line.
    Increment(ItemId),
    /// One fewer unit; the line is removed when it reaches zero.
    Decrement(ItemId),
    GetTotal,
    /// Builds an order submission without touching the cart.
    Checkout,
    /// Builds an order submission and empties the cart in one step.
    CompleteCheckout,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// New quantity of the line
    AddItem(u32),
    /// Whether a line was removed
    RemoveItem(bool),
    /// Whether a line for the item existed
    UpdateQuantity(bool),
    /// New quantity, `None` if there was no line
    Increment(Option<u32>),
    /// New quantity (`0` once removed), `None` if there was no line
    Decrement(Option<u32>),
    GetTotal(Decimal),
    Checkout(OrderSubmission),
    CompleteCheckout(OrderSubmission),
}
