use thiserror::Error;

use crate::domain::{ItemId, LineError};

/// Errors that can occur during cart operations. A rejected operation never
/// changes the cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Item unavailable: {0}")]
    ItemUnavailable(ItemId),
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<LineError> for CartError {
    fn from(error: LineError) -> Self {
        match error {
            LineError::ItemUnavailable(item_id) => CartError::ItemUnavailable(item_id),
            LineError::QuantityOverflow(item_id) => {
                CartError::InvalidQuantity(format!("quantity overflow for item {item_id}"))
            }
        }
    }
}
