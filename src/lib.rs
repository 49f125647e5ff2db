//! # Storefront
//!
//! A single-page plant shop: a fixed catalog, a per-session cart, and a mock
//! checkout flow, all in memory.
//!
//! ## Layout
//!
//! - **Domain types** - items, carts, snapshots, order submissions → [`domain`]
//! - **Actor framework** - a generic single-owner actor publishing snapshots → [`actor_framework`]
//! - **Cart actor** - cart actions and their results → [`cart_actor`]
//! - **Clients** - typed handles with traced, macro-generated methods → [`clients::CartClient`]
//! - **Checkout flow** - `Browsing -> CartReview -> PaymentEntry -> {Completed, Cancelled}` → [`checkout`]
//! - **Sessions** - the user input surface → [`session::StoreSession`]
//! - **Views** - text rendering driven by snapshot subscriptions → [`view`]
//! - **System** - startup, per-session actors, shutdown, tracing → [`app_system`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), storefront::error::StoreError> {
//! use storefront::app_system::StoreSystem;
//! use storefront::domain::{ItemId, PaymentDetails};
//!
//! let mut system = StoreSystem::new();
//! let mut session = system.open_session();
//!
//! session.select_item(ItemId(1)).await?;
//! session.open_cart()?;
//! session.proceed_to_payment().await?;
//! let receipt = session
//!     .submit_payment(PaymentDetails::new("1234 5678 9012 3456", "John Doe", "12/30", "123"))
//!     .await?;
//! println!("{}", receipt.message);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod domain;
pub mod error;
pub mod session;
pub mod view;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
