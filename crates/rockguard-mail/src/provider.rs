//! Selects the configured mail transport.

use std::sync::Arc;

use tracing::info;

use rockguard_core::config::MailConfig;
use rockguard_core::error::AppError;
use rockguard_core::result::AppResult;
use rockguard_core::traits::MailTransport;

use crate::providers::memory::MemoryMailTransport;
use crate::providers::resend::ResendTransport;

/// Build the transport named by `config.provider`.
pub fn build_transport(config: &MailConfig) -> AppResult<Arc<dyn MailTransport>> {
    let transport: Arc<dyn MailTransport> = match config.provider.as_str() {
        "resend" => {
            info!(
                timeout_secs = config.timeout_seconds,
                "Initializing Resend mail transport"
            );
            Arc::new(ResendTransport::new(config))
        }
        "memory" => {
            info!("Initializing in-memory mail transport (messages are not delivered)");
            Arc::new(MemoryMailTransport::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown mail provider: '{other}'. Supported: resend, memory"
            )));
        }
    };

    Ok(transport)
}
