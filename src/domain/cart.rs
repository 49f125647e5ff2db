use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use super::item::{Item, ItemId};
use super::money::round_to_cents;
use super::order::OrderSubmission;

/// Reasons the cart refuses a mutation. The cart is left untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineError {
    #[error("Item unavailable: {0}")]
    ItemUnavailable(ItemId),
    #[error("Quantity overflow for item {0}")]
    QuantityOverflow(ItemId),
}

/// Identifies one browsing session and the cart it owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item and how many of it are in the cart. Quantity is always at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item: Item,
    quantity: u32,
}

impl CartLine {
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_id(&self) -> ItemId {
        self.item.id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.item.price().amount() * Decimal::from(self.quantity)
    }
}

/// Immutable view of a cart, published to subscribers after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    session_id: SessionId,
    lines: Vec<CartLine>,
    total: Decimal,
    revision: u64,
}

impl CartSnapshot {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Bumped once per state change; equal revisions mean equal contents.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of distinct lines, as shown on the header's cart button.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, item_id: ItemId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.item_id() == item_id)
            .map(CartLine::quantity)
    }
}

/// The ordered lines of one session. Iteration order is the order items were first added.
#[derive(Debug, Clone)]
pub struct Cart {
    session_id: SessionId,
    lines: Vec<CartLine>,
    revision: u64,
}

impl Cart {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            lines: Vec::new(),
            revision: 0,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `item`, returning the line's new quantity.
    ///
    /// # Errors
    /// [`LineError::ItemUnavailable`] if the item is out of stock,
    /// [`LineError::QuantityOverflow`] if the line is already at `u32::MAX`.
    pub fn add_item(&mut self, item: &Item) -> Result<u32, LineError> {
        if !item.is_available() {
            return Err(LineError::ItemUnavailable(item.id()));
        }

        let quantity = match self.line_mut(item.id()) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(1)
                    .ok_or(LineError::QuantityOverflow(item.id()))?;
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                });
                1
            }
        };
        self.touch();
        Ok(quantity)
    }

    /// Removes the line for `item_id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, item_id: ItemId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.item_id() == item_id)?;
        let line = self.lines.remove(index);
        self.touch();
        Some(line)
    }

    /// Sets an absolute quantity. Zero removes the line. Returns whether a line
    /// for `item_id` existed.
    pub fn update_quantity(&mut self, item_id: ItemId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(item_id).is_some();
        }

        let Some(line) = self.line_mut(item_id) else {
            return false;
        };
        if line.quantity != quantity {
            line.quantity = quantity;
            self.touch();
        }
        true
    }

    /// One more unit of an existing line. `None` if there is no such line.
    pub fn increment(&mut self, item_id: ItemId) -> Result<Option<u32>, LineError> {
        let Some(line) = self.line_mut(item_id) else {
            return Ok(None);
        };
        line.quantity = line
            .quantity
            .checked_add(1)
            .ok_or(LineError::QuantityOverflow(item_id))?;
        let quantity = line.quantity;
        self.touch();
        Ok(Some(quantity))
    }

    /// One fewer unit; a line at 1 is removed and `Some(0)` returned. `None`
    /// if there is no such line.
    pub fn decrement(&mut self, item_id: ItemId) -> Option<u32> {
        let quantity = self.line_mut(item_id)?.quantity - 1;
        self.update_quantity(item_id, quantity);
        Some(quantity)
    }

    /// Sum of every line total, rounded to cents. Never cached.
    pub fn total(&self) -> Decimal {
        round_to_cents(self.lines.iter().map(CartLine::line_total).sum())
    }

    /// Captures the current lines and total without changing the cart.
    pub fn checkout(&self) -> OrderSubmission {
        OrderSubmission::new(self.session_id.clone(), self.lines.clone(), self.total())
    }

    /// Captures the submission and empties the cart in the same step.
    pub fn complete_checkout(&mut self) -> OrderSubmission {
        let submission = self.checkout();
        if !self.lines.is_empty() {
            self.lines.clear();
            self.touch();
        }
        submission
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            session_id: self.session_id.clone(),
            lines: self.lines.clone(),
            total: self.total(),
            revision: self.revision,
        }
    }

    fn line_mut(&mut self, item_id: ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item_id() == item_id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
