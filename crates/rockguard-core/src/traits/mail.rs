//! Mail transport trait for pluggable email delivery backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A fully rendered email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Sender identity, `Name <address>`.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text body for clients that cannot render HTML.
    pub text: String,
}

/// What the provider returned for an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider message identifier, if the provider returned one.
    pub id: Option<String>,
}

/// Trait for email delivery backends.
///
/// Implementations live in `rockguard-mail`. Any failure (network,
/// timeout, provider rejection, missing credentials) is reported as an
/// `Err`; callers decide whether that is fatal.
#[async_trait]
pub trait MailTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "resend", "memory").
    fn provider_type(&self) -> &str;

    /// Deliver one message to all of its recipients.
    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt>;
}
