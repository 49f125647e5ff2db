use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors raised when constructing a price.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Builds a price from a whole number of cents, e.g. `2499` for `$24.99`.
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

/// Rounds a money amount to whole cents, half away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display, always with two decimals: `$49.98`, `$0.00`.
pub fn format_amount(amount: Decimal) -> String {
    let mut cents = round_to_cents(amount);
    cents.rescale(2);
    format!("${cents}")
}
