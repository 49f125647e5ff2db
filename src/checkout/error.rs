use thiserror::Error;

use super::flow::{CheckoutEvent, CheckoutState};

/// Errors that can occur while moving through the checkout flow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cannot {event} while in {state}")]
    InvalidTransition {
        state: CheckoutState,
        event: CheckoutEvent,
    },
    #[error("Cannot proceed to payment with an empty cart")]
    EmptyCart,
}
