//! Device model: register catalog and display lookups.

pub mod lookup;
pub mod registers;

pub use registers::{ProfileField, ProfileIndex, Register};
