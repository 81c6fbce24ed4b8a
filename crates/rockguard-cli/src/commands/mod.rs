//! CLI command definitions and dispatch.

pub mod config;
pub mod send;

use clap::{Parser, Subcommand};

use rockguard_core::config::AppConfig;
use rockguard_core::error::AppError;

use crate::output::OutputFormat;

/// RockGuard: rockfall evacuation alerting
#[derive(Debug, Parser)]
#[command(name = "rockguard", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; when omitted, config/default.toml plus the
    /// environment overlay and ROCKGUARD__* variables are used
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay to load (config/{env}.toml)
    #[arg(short, long, env = "ROCKGUARD_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send one evacuation alert
    Send(send::SendArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Send(args) => send::execute(args, &self.load_config()?, self.format).await,
            Commands::Config(args) => config::execute(args, self, self.format),
        }
    }

    /// Load configuration from `--config` or the layered default sources.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}
