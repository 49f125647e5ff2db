//! Text rendering of catalog and cart state. The view only reads snapshots;
//! it has no way to change a cart.

use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};
use tokio::sync::watch;

use crate::checkout::CheckoutState;
use crate::domain::{format_amount, CartSnapshot, Catalog, OrderSubmission, PaymentReceipt};

pub const STORE_NAME: &str = "Online Store";
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// `Online Store  [Cart (n)]`, with `n` the number of lines.
pub fn render_header(snapshot: &CartSnapshot) -> String {
    format!("{STORE_NAME}  [Cart ({})]", snapshot.line_count())
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut builder = Builder::default();
    builder.push_record(["", "Plant", "Description", "Price", ""]);
    for item in catalog.list_items() {
        let action = if item.is_available() {
            "Add to Cart"
        } else {
            "Out of Stock"
        };
        builder.push_record([
            item.glyph().to_string(),
            item.name().to_string(),
            item.description().to_string(),
            item.price().to_string(),
            action.to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::new(3..4), Alignment::right());
    table.to_string()
}

pub fn render_cart(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return format!("Your Cart\n{EMPTY_CART_MESSAGE}");
    }

    let mut builder = Builder::default();
    builder.push_record(["", "Item", "Price", "Qty", "Subtotal"]);
    for line in snapshot.lines() {
        let item = line.item();
        builder.push_record([
            item.glyph().to_string(),
            item.name().to_string(),
            item.price().to_string(),
            format!("- {} +", line.quantity()),
            format_amount(line.line_total()),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::new(2..), Alignment::right());
    format!(
        "Your Cart\n{table}\nTotal: {}",
        format_amount(snapshot.total())
    )
}

pub fn render_payment_form(submission: &OrderSubmission) -> String {
    format!(
        "Payment Details\n  Card Number\n  Card Holder\n  Expiry Date  CVV\n[Cancel]  [Pay {}]",
        format_amount(submission.total())
    )
}

pub fn render_receipt(receipt: &PaymentReceipt) -> String {
    format!(
        "{} ({} charged)",
        receipt.message,
        format_amount(receipt.submission.total())
    )
}

/// Renders the page for the given flow state.
pub fn render_page(catalog: &Catalog, snapshot: &CartSnapshot, state: CheckoutState) -> String {
    let mut page = format!("{}\n{}", render_header(snapshot), render_catalog(catalog));
    if state == CheckoutState::CartReview {
        page.push('\n');
        page.push_str(&render_cart(snapshot));
    }
    page
}

/// A pure subscriber: yields a freshly rendered cart every time a new
/// snapshot is published.
pub struct CartView {
    snapshots: watch::Receiver<CartSnapshot>,
}

impl CartView {
    pub fn new(snapshots: watch::Receiver<CartSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Renders whatever is current, marking it seen.
    pub fn current_frame(&mut self) -> String {
        render_cart(&self.snapshots.borrow_and_update())
    }

    /// Waits for the next snapshot. `None` once the cart actor is gone.
    pub async fn next_frame(&mut self) -> Option<String> {
        self.snapshots.changed().await.ok()?;
        Some(self.current_frame())
    }

    /// Renders a frame if a snapshot arrived since the last one, without waiting.
    pub fn poll_frame(&mut self) -> Option<String> {
        match self.snapshots.has_changed() {
            Ok(true) => Some(self.current_frame()),
            _ => None,
        }
    }
}
