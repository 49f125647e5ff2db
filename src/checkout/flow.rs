use std::fmt;

use tracing::{debug, info};

use super::error::CheckoutError;

/// Where the shopper is in the checkout flow.
///
/// `Completed` and `Cancelled` are reported as the outcome of a transition but
/// never rest: they settle into `Browsing` and `CartReview` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Browsing,
    CartReview,
    PaymentEntry,
    Completed,
    Cancelled,
}

impl CheckoutState {
    /// The resting state a terminal outcome returns to.
    pub fn settle(self) -> Self {
        match self {
            CheckoutState::Completed => CheckoutState::Browsing,
            CheckoutState::Cancelled => CheckoutState::CartReview,
            other => other,
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutState::Browsing => "browsing",
            CheckoutState::CartReview => "cart review",
            CheckoutState::PaymentEntry => "payment entry",
            CheckoutState::Completed => "completed",
            CheckoutState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// User actions that move the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEvent {
    OpenCart,
    CloseCart,
    ProceedToPayment,
    SubmitPayment,
    CancelPayment,
}

impl fmt::Display for CheckoutEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutEvent::OpenCart => "open cart",
            CheckoutEvent::CloseCart => "close cart",
            CheckoutEvent::ProceedToPayment => "proceed to payment",
            CheckoutEvent::SubmitPayment => "submit payment",
            CheckoutEvent::CancelPayment => "cancel payment",
        };
        f.write_str(name)
    }
}

/// UI-level state machine for `Browsing -> CartReview -> PaymentEntry -> {Completed, Cancelled}`.
///
/// The flow never touches the cart itself; the session clears the cart when a
/// `SubmitPayment` transition is accepted.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The outcome `event` would produce, without applying it.
    ///
    /// # Errors
    /// [`CheckoutError::InvalidTransition`] for any pair outside the table.
    pub fn peek(&self, event: CheckoutEvent) -> Result<CheckoutState, CheckoutError> {
        use CheckoutEvent as E;
        use CheckoutState as S;

        match (self.state, event) {
            (S::Browsing, E::OpenCart) => Ok(S::CartReview),
            (S::CartReview, E::CloseCart) => Ok(S::Browsing),
            (S::CartReview, E::ProceedToPayment) => Ok(S::PaymentEntry),
            (S::PaymentEntry, E::SubmitPayment) => Ok(S::Completed),
            (S::PaymentEntry, E::CancelPayment) => Ok(S::Cancelled),
            (state, event) => Err(CheckoutError::InvalidTransition { state, event }),
        }
    }

    /// Applies `event`, returning the raw outcome (which may be `Completed` or
    /// `Cancelled`). The flow itself rests in the settled state.
    pub fn apply(&mut self, event: CheckoutEvent) -> Result<CheckoutState, CheckoutError> {
        let outcome = self.peek(event)?;
        let from = self.state;
        self.state = outcome.settle();
        match outcome {
            CheckoutState::Completed | CheckoutState::Cancelled => {
                info!(%from, %event, %outcome, to = %self.state, "Checkout finished")
            }
            _ => debug!(%from, %event, to = %self.state, "Checkout transition"),
        }
        Ok(outcome)
    }
}
