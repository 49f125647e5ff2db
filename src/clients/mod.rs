//! Typed clients wrapping the generic actor handles.

#[macro_use]
mod macros;
mod cart_client;

pub use cart_client::*;
