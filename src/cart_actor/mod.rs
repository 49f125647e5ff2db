//! The per-session cart actor: actions, errors, and the entity binding.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
