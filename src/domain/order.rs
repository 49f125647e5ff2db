use std::fmt;

use rust_decimal::Decimal;

use super::cart::{CartLine, SessionId};

/// The lines and total handed to the payment step at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub session_id: SessionId,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl OrderSubmission {
    pub fn new(session_id: SessionId, lines: Vec<CartLine>, total: Decimal) -> Self {
        Self {
            session_id,
            lines,
            total,
        }
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }
}

/// What the shopper typed into the payment form. Never validated or charged.
#[derive(Clone, Default, PartialEq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    pub fn new(
        card_number: impl Into<String>,
        card_holder: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            card_holder: card_holder.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }
}

// Card data stays out of logs.
impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_number", &"<redacted>")
            .field("card_holder", &self.card_holder)
            .field("expiry", &self.expiry)
            .field("cvv", &"<redacted>")
            .finish()
    }
}

pub const PAYMENT_SUCCESS_MESSAGE: &str = "Payment successful! Your plants will be delivered soon.";

/// Confirmation returned once a mock payment completes.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub submission: OrderSubmission,
    pub message: String,
}

impl PaymentReceipt {
    pub fn new(submission: OrderSubmission) -> Self {
        Self {
            submission,
            message: PAYMENT_SUCCESS_MESSAGE.to_string(),
        }
    }
}
