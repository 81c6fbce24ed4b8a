//! One-shot evacuation alert from the command line.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use rockguard_alert::{AlertDetails, DispatchResult, NotificationDispatcher};
use rockguard_core::config::AppConfig;
use rockguard_core::error::AppError;
use rockguard_core::types::Recipient;

use crate::output::{self, OutputFormat};

/// Arguments for `send`. Omitted details fall back to the `[site]` configuration.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Recipient address (repeatable)
    #[arg(short = 'm', long = "email", required = true)]
    pub emails: Vec<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub threat: Option<String>,
    #[arg(long)]
    pub confidence: Option<String>,
    #[arg(long)]
    pub zones: Option<String>,
    #[arg(long)]
    pub personnel: Option<String>,
}

impl SendArgs {
    fn details(&self, config: &AppConfig) -> AlertDetails {
        let mut details = AlertDetails::from(&config.site);
        let overrides = [
            (&self.city, &mut details.location.city),
            (&self.state, &mut details.location.state),
            (&self.threat, &mut details.threat),
            (&self.confidence, &mut details.confidence),
            (&self.zones, &mut details.affected_zones),
            (&self.personnel, &mut details.personnel_at_risk),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        details
    }

    fn recipients(&self) -> Result<Vec<Recipient>, AppError> {
        self.emails
            .iter()
            .map(|raw| {
                Recipient::parse(raw)
                    .ok_or_else(|| AppError::validation(format!("Invalid email address: '{raw}'")))
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct SendSummary<'a> {
    subject: String,
    recipients: &'a [Recipient],
    result: &'a DispatchResult,
}

/// Execute `send`
pub async fn execute(
    args: &SendArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let recipients = args.recipients()?;
    let details = args.details(config);

    let transport = rockguard_mail::build_transport(&config.mail)?;
    let dispatcher = Arc::new(NotificationDispatcher::new(
        transport,
        config.mail.from.clone(),
        config.broadcast.interval(),
    )?);

    let payload = details.issue();
    let subject = dispatcher.compose(&recipients, &payload)?.subject;
    let result = dispatcher.send(&recipients, &payload).await;

    match format {
        OutputFormat::Json => output::print_item(
            &SendSummary {
                subject,
                recipients: &recipients,
                result: &result,
            },
            format,
        ),
        OutputFormat::Text => {
            output::print_kv("Subject", &subject);
            output::print_kv("Recipients", &recipients.len().to_string());
            output::print_kv("Provider", dispatcher.provider_type());
        }
    }

    match result {
        DispatchResult::Delivered {
            provider_message_id,
        } => {
            if format == OutputFormat::Text {
                output::print_success(&format!(
                    "Alert sent to {} recipient(s) (id: {})",
                    recipients.len(),
                    provider_message_id.as_deref().unwrap_or("-")
                ));
            }
            Ok(())
        }
        DispatchResult::Failed { reason } => Err(AppError::external_service(format!(
            "Alert not sent: {reason}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{Cli, Commands};

    fn parse(args: &[&str]) -> SendArgs {
        let cli = Cli::try_parse_from(args).expect("valid args");
        match cli.command {
            Commands::Send(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_fall_back_to_site() {
        let args = parse(&[
            "rockguard", "send", "--email", "ops@site", "--city", "Leh", "--zones", "Crest",
        ]);
        let details = args.details(&AppConfig::default());
        assert_eq!(details.location.city, "Leh");
        assert_eq!(details.location.state, "Himachal Pradesh");
        assert_eq!(details.affected_zones, "Crest");
        assert_eq!(details.personnel_at_risk, "12 WORKERS");
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let args = parse(&["rockguard", "send", "-m", "ops@site", "-m", "nobody"]);
        assert!(args.recipients().is_err());
    }

    #[test]
    fn test_email_is_required() {
        assert!(Cli::try_parse_from(["rockguard", "send"]).is_err());
    }

    #[tokio::test]
    async fn test_send_through_memory_transport() {
        let mut config = AppConfig::default();
        config.mail.provider = "memory".to_string();
        let args = parse(&["rockguard", "send", "--email", "ops@site"]);

        execute(&args, &config, OutputFormat::Json)
            .await
            .expect("memory transport accepts");
    }
}
