//! # rockguard-mail
//!
//! Email delivery backends implementing
//! [`rockguard_core::traits::MailTransport`]:
//!
//! - `resend`: the Resend HTTP API
//! - `memory`: records messages in memory, for development and tests

pub mod provider;
pub mod providers;

pub use provider::build_transport;
pub use providers::memory::MemoryMailTransport;
pub use providers::resend::ResendTransport;
