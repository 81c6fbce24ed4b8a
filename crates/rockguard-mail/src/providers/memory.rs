//! In-memory mail transport.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use rockguard_core::error::AppError;
use rockguard_core::result::AppResult;
use rockguard_core::traits::{DeliveryReceipt, MailTransport, OutboundEmail};

/// Records every message instead of delivering it.
///
/// A failure reason can be injected to simulate provider outages.
#[derive(Debug, Default)]
pub struct MemoryMailTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    failure: Mutex<Option<String>>,
    attempts: AtomicU64,
}

impl MemoryMailTransport {
    /// Create a transport that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that rejects every message with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        let transport = Self::default();
        transport.set_failure(Some(reason.into()));
        transport
    }

    /// Start (`Some`) or stop (`None`) rejecting messages.
    pub fn set_failure(&self, reason: Option<String>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = reason;
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of accepted messages.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of send attempts, accepted or rejected.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailTransport for MemoryMailTransport {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        let failure = self
            .failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(reason) = failure {
            return Err(AppError::external_service(reason));
        }

        tracing::debug!(
            recipients = email.to.len(),
            subject = %email.subject,
            "Recorded email in memory transport"
        );

        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(email.clone());

        Ok(DeliveryReceipt {
            id: Some(format!("mem-{attempt}")),
        })
    }
}
