//! Notification token CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use carepanel_core::config::AppConfig;
use carepanel_core::error::AppError;
use carepanel_core::types::TokenState;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Ask for notification permission and obtain a token
    Request,
    /// Re-issue the token, picking up a rotated value
    Refresh,
    /// Show the current token state
    Status,
}

/// Token state for display. Only a fingerprint of the token is shown.
#[derive(Debug, Serialize)]
struct TokenStatus {
    state: &'static str,
    fingerprint: Option<String>,
    cache: String,
}

impl TokenStatus {
    fn new(state: &TokenState, config: &AppConfig) -> Self {
        Self {
            state: state.name(),
            fingerprint: state.token().map(|t| t.fingerprint()),
            cache: config.token_cache.provider.clone(),
        }
    }
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let transport = super::create_transport(config)?;
    let lifecycle = super::create_lifecycle(config, transport).await?;

    let outcome = match &args.command {
        TokenCommand::Request => Some(lifecycle.request_permission().await),
        TokenCommand::Refresh => Some(lifecycle.refresh().await),
        TokenCommand::Status => None,
    };

    let status = TokenStatus::new(&lifecycle.state(), config);
    match format {
        OutputFormat::Json => output::print_json(&status),
        OutputFormat::Table => {
            if let Some(Ok(token)) = &outcome {
                output::print_success(&format!(
                    "Notification token ready ({})",
                    token.fingerprint()
                ));
            }
            output::print_kv("State", status.state);
            output::print_kv(
                "Token",
                status.fingerprint.as_deref().unwrap_or("(none)"),
            );
            output::print_kv("Cache", &status.cache);
        }
    }

    match outcome {
        Some(Err(e)) => Err(e.into()),
        _ => Ok(()),
    }
}
