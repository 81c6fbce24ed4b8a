//! Core traits defined in `rockguard-core` and implemented by other crates.

pub mod mail;

pub use mail::{DeliveryReceipt, MailTransport, OutboundEmail};
