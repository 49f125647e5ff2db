use thiserror::Error;

use crate::cart_actor::CartError;
use crate::checkout::CheckoutError;
use crate::domain::CatalogError;

/// Top-level error for store sessions and the store system.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
