//! CLI command definitions and dispatch.

pub mod config;
pub mod notify;
pub mod report;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use carepanel_cache::TokenCacheManager;
use carepanel_core::config::AppConfig;
use carepanel_core::error::AppError;
use carepanel_core::AppResult;
use carepanel_notify::{FixedPermission, HttpPushProvider, PermissionPrompt, TokenLifecycle};
use carepanel_transport::{HttpTransport, Transport};

use crate::output::OutputFormat;
use crate::prompt::TerminalPrompt;

/// CarePanel: clinician productivity reports and push notifications
#[derive(Debug, Parser)]
#[command(name = "carepanel", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/local.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one page of the productivity report
    Report(report::ReportArgs),
    /// Notification token lifecycle
    Token(token::TokenArgs),
    /// Send a push notification
    Notify(notify::NotifyArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command with the already-loaded configuration.
    pub async fn execute(&self, loaded: AppResult<AppConfig>) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, &self.config, loaded, self.format),
            Commands::Report(args) => report::execute(args, &loaded?, self.format).await,
            Commands::Token(args) => token::execute(args, &loaded?, self.format).await,
            Commands::Notify(args) => notify::execute(args, &loaded?, self.format).await,
        }
    }
}

/// Helper: load and validate configuration
pub fn load_config(config_path: &str) -> AppResult<AppConfig> {
    AppConfig::load(config_path)
}

/// Helper: HTTP transport for the data API
pub fn create_transport(config: &AppConfig) -> AppResult<Arc<dyn Transport>> {
    Ok(Arc::new(HttpTransport::new(&config.api)?))
}

/// Helper: token lifecycle wired to the configured cache and permission policy,
/// with any persisted token already restored
pub async fn create_lifecycle(
    config: &AppConfig,
    transport: Arc<dyn Transport>,
) -> AppResult<Arc<TokenLifecycle>> {
    let prompt: Arc<dyn PermissionPrompt> =
        match FixedPermission::from_policy(config.push.permission) {
            Some(fixed) => Arc::new(fixed),
            None => Arc::new(TerminalPrompt),
        };
    let provider = HttpPushProvider::new(transport, config.push.registration_path.clone(), prompt);
    let cache = TokenCacheManager::new(&config.token_cache)?;

    let lifecycle = Arc::new(TokenLifecycle::new(
        Arc::new(provider),
        cache.store(),
        config.push.public_key.clone(),
    ));
    lifecycle.restore().await;
    Ok(lifecycle)
}
