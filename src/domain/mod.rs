//! Storefront domain types: catalog items, carts, and order submissions.

pub mod cart;
pub mod catalog;
pub mod item;
pub mod money;
pub mod order;

pub use cart::*;
pub use catalog::*;
pub use item::*;
pub use money::*;
pub use order::*;
