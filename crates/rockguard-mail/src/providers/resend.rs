//! Resend transport backed by the `resend-rs` client.

use std::time::Duration;

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::rate_limit::{RetryOptions, send_with_retry_opts};
use resend_rs::types::CreateEmailBaseOptions;

use rockguard_core::config::MailConfig;
use rockguard_core::error::{AppError, ErrorKind};
use rockguard_core::result::AppResult;
use rockguard_core::traits::{DeliveryReceipt, MailTransport, OutboundEmail};

/// Sends email through the Resend API.
///
/// A missing API key does not prevent construction; every send then fails
/// with a configuration error, which the dispatcher reports as a failed
/// delivery.
#[derive(Debug)]
pub struct ResendTransport {
    client: Option<Resend>,
    timeout: Duration,
    retry_options: RetryOptions,
}

impl ResendTransport {
    /// Create a transport from configuration, resolving the API key from
    /// `mail.api_key` or `RESEND_API_KEY`.
    pub fn new(config: &MailConfig) -> Self {
        Self::with_api_key(config, config.resolved_api_key())
    }

    /// Create a transport with an explicit API key.
    pub fn with_api_key(config: &MailConfig, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("Resend API key is not configured; deliveries will fail");
        }

        Self {
            client: api_key.as_deref().map(Resend::new),
            timeout: Duration::from_secs(config.timeout_seconds),
            // Resend allows a handful of requests per second; retry briefly on 429.
            retry_options: RetryOptions {
                duration_ms: 150,
                jitter_range_ms: 0..500,
                max_retries: 3,
            },
        }
    }
}

#[async_trait]
impl MailTransport for ResendTransport {
    fn provider_type(&self) -> &str {
        "resend"
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let Self {
            client,
            timeout,
            retry_options,
        } = self;

        let client = client.as_ref().ok_or_else(|| {
            AppError::configuration("Resend API key is not configured (mail.api_key or RESEND_API_KEY)")
        })?;

        let request = CreateEmailBaseOptions::new(
            email.from.as_str(),
            email.to.iter().map(String::as_str),
            email.subject.as_str(),
        )
        .with_html(&email.html)
        .with_text(&email.text);

        let sent = tokio::time::timeout(
            *timeout,
            send_with_retry_opts(
                || async { client.emails.send(request.clone()).await },
                retry_options,
            ),
        )
        .await
        .map_err(|_| {
            AppError::external_service(format!(
                "Resend request timed out after {}s",
                timeout.as_secs()
            ))
        })?;

        let response = sent.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Resend rejected the message: {e}"),
                e,
            )
        })?;

        Ok(DeliveryReceipt {
            id: Some(response.id.to_string()),
        })
    }
}
