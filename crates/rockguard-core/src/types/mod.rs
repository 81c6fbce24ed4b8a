//! Shared domain types.

pub mod recipient;

pub use recipient::Recipient;
