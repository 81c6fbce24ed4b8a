//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use rockguard_core::config::AppConfig;
use rockguard_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (API key redacted)
    Show,
    /// Check that the configuration loads and a mail transport can be built
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(cli.load_config()?);
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => {
            let config = cli.load_config()?;
            rockguard_mail::build_transport(&config.mail)?;

            output::print_success("Configuration is valid");
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Mail provider", &config.mail.provider);
            output::print_kv(
                "API key",
                if config.mail.resolved_api_key().is_some() {
                    "set"
                } else {
                    "missing"
                },
            );
            output::print_kv(
                "Broadcast interval",
                &format!("{}s", config.broadcast.interval().as_secs()),
            );
            output::print_kv(
                "Countdown",
                &format!("{}s", config.broadcast.countdown_seconds),
            );
        }
    }
    Ok(())
}

fn redacted(mut config: AppConfig) -> AppConfig {
    config.mail = config.mail.redacted();
    config
}
