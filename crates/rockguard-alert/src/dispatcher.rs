//! Single-shot alert dispatch.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use rockguard_core::result::AppResult;
use rockguard_core::traits::{MailTransport, OutboundEmail};
use rockguard_core::types::Recipient;

use crate::formatter::EvacuationEmailFormatter;
use crate::payload::AlertPayload;

/// Outcome of one dispatch attempt. Never an error: failures are data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchResult {
    Delivered { provider_message_id: Option<String> },
    Failed { reason: String },
}

impl DispatchResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Renders an [`AlertPayload`] and sends it through a [`MailTransport`]
/// as one message addressed to every recipient.
#[derive(Debug)]
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
    formatter: EvacuationEmailFormatter,
    from: String,
    resend_interval: Duration,
}

impl NotificationDispatcher {
    /// `resend_interval` is quoted in the email body as the update cadence.
    ///
    /// Fails only if the email templates do not register.
    pub fn new(
        transport: Arc<dyn MailTransport>,
        from: impl Into<String>,
        resend_interval: Duration,
    ) -> AppResult<Self> {
        Ok(Self {
            transport,
            formatter: EvacuationEmailFormatter::new()?,
            from: from.into(),
            resend_interval,
        })
    }

    /// Name of the underlying provider.
    pub fn provider_type(&self) -> &str {
        self.transport.provider_type()
    }

    /// Build the outbound message without sending it.
    pub fn compose(
        &self,
        recipients: &[Recipient],
        payload: &AlertPayload,
    ) -> AppResult<OutboundEmail> {
        Ok(OutboundEmail {
            from: self.from.clone(),
            to: recipients.iter().map(|r| r.as_str().to_string()).collect(),
            subject: self.formatter.subject(payload)?,
            html: self.formatter.html(payload, self.resend_interval)?,
            text: self.formatter.text(payload, self.resend_interval)?,
        })
    }

    /// Send `payload` to `recipients`.
    ///
    /// An empty recipient list fails without contacting the provider.
    pub async fn send(&self, recipients: &[Recipient], payload: &AlertPayload) -> DispatchResult {
        if recipients.is_empty() {
            tracing::warn!(target: "rockguard::audit", "Evacuation alert skipped: no recipients");
            return DispatchResult::Failed {
                reason: "no recipients".to_string(),
            };
        }

        let email = match self.compose(recipients, payload) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(
                    target: "rockguard::audit",
                    recipients = recipients.len(),
                    error = %e,
                    "Evacuation alert could not be rendered"
                );
                return DispatchResult::Failed { reason: e.message };
            }
        };

        tracing::info!(
            target: "rockguard::audit",
            recipients = recipients.len(),
            subject = %email.subject,
            issued_at = %payload.issued_at().to_rfc3339(),
            provider = self.transport.provider_type(),
            "Sending evacuation alert"
        );

        match self.transport.send(&email).await {
            Ok(receipt) => {
                tracing::info!(
                    target: "rockguard::audit",
                    recipients = recipients.len(),
                    provider_message_id = receipt.id.as_deref().unwrap_or("-"),
                    "Evacuation alert delivered"
                );
                DispatchResult::Delivered {
                    provider_message_id: receipt.id,
                }
            }
            Err(e) => {
                tracing::error!(
                    target: "rockguard::audit",
                    recipients = recipients.len(),
                    error = %e,
                    "Evacuation alert failed"
                );
                DispatchResult::Failed { reason: e.message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rockguard_core::config::SiteConfig;
    use rockguard_mail::MemoryMailTransport;

    use super::*;
    use crate::payload::AlertDetails;

    fn recipients(addresses: &[&str]) -> Vec<Recipient> {
        addresses
            .iter()
            .filter_map(|a| Recipient::parse(a))
            .collect()
    }

    fn dispatcher(transport: Arc<MemoryMailTransport>) -> NotificationDispatcher {
        NotificationDispatcher::new(
            transport,
            "RockGuard AI <onboarding@resend.dev>",
            Duration::from_secs(15),
        )
        .expect("dispatcher builds")
    }

    #[tokio::test]
    async fn test_delivers_one_message_to_all_recipients() {
        let transport = Arc::new(MemoryMailTransport::new());
        let dispatcher = dispatcher(transport.clone());
        let payload = AlertDetails::from(&SiteConfig::default()).issue();

        let result = dispatcher
            .send(&recipients(&["ops@site", "safety@site"]), &payload)
            .await;

        assert_eq!(
            result,
            DispatchResult::Delivered {
                provider_message_id: Some("mem-1".to_string())
            }
        );
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["ops@site", "safety@site"]);
        assert_eq!(
            sent[0].subject,
            "URGENT: EVACUATION ALERT - Shimla, Himachal Pradesh"
        );
        assert!(sent[0].html.contains("North Wall, Crest Zone"));
        assert!(sent[0].text.contains("PERSONNEL AT RISK: 12 WORKERS"));
    }

    #[tokio::test]
    async fn test_empty_recipients_never_reach_provider() {
        let transport = Arc::new(MemoryMailTransport::new());
        let dispatcher = dispatcher(transport.clone());
        let payload = AlertDetails::from(&SiteConfig::default()).issue();

        let result = dispatcher.send(&[], &payload).await;

        assert_eq!(
            result,
            DispatchResult::Failed {
                reason: "no recipients".to_string()
            }
        );
        assert_eq!(transport.attempts(), 0);
    }

    #[tokio::test]
    async fn test_provider_rejection_is_failed_result() {
        let transport = Arc::new(MemoryMailTransport::failing("invalid api key"));
        let dispatcher = dispatcher(transport.clone());
        let payload = AlertDetails::from(&SiteConfig::default()).issue();

        let result = dispatcher.send(&recipients(&["ops@site"]), &payload).await;

        assert!(!result.is_delivered());
        assert_eq!(
            result,
            DispatchResult::Failed {
                reason: "invalid api key".to_string()
            }
        );
    }

    #[derive(Clone)]
    struct LogSink(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_audit_log_records_count_not_addresses() {
        let sink = LogSink(Arc::default());
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let transport = Arc::new(MemoryMailTransport::new());
        let payload = AlertDetails::from(&SiteConfig::default()).issue();
        dispatcher(transport)
            .send(&recipients(&["ops@site", "safety@site"]), &payload)
            .await;

        let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Sending evacuation alert"), "{logs}");
        assert!(logs.contains("recipients=2"), "{logs}");
        assert!(!logs.contains("ops@site"), "{logs}");
        assert!(!logs.contains("safety@site"), "{logs}");
    }

    #[test]
    fn test_result_serializes_tagged() {
        let json = serde_json::to_value(DispatchResult::Failed {
            reason: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "x");
    }
}
