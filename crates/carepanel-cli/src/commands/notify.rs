//! Push notification CLI command.

use clap::Args;
use tracing::warn;

use carepanel_core::config::AppConfig;
use carepanel_core::error::{AppError, ErrorKind};
use carepanel_core::types::{DispatchResult, NotificationMessage, TokenState};
use carepanel_notify::NotificationDispatcher;

use crate::output::{self, OutputFormat};

/// Arguments for the notify command
#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Notification title
    #[arg(short, long)]
    pub title: String,

    /// Notification body
    #[arg(short, long, default_value = "")]
    pub body: String,
}

/// Execute the notify command
pub async fn execute(
    args: &NotifyArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let transport = super::create_transport(config)?;
    let lifecycle = super::create_lifecycle(config, transport.clone()).await?;

    // Denial is not persisted, so every run without a cached token asks
    // for permission once.
    let outcome = match lifecycle.state() {
        TokenState::Unrequested => lifecycle.request_permission().await,
        _ => lifecycle.get_token().await,
    };
    if let Err(e) = outcome {
        warn!(error = %e, "No notification token available");
    }

    let dispatcher = NotificationDispatcher::new(
        transport,
        lifecycle.subscribe(),
        config.push.dispatch_path.clone(),
        config.push.history_limit,
    );
    let message = NotificationMessage::new(args.title.clone(), args.body.clone());
    let result = dispatcher.dispatch(&message).await?;

    if format == OutputFormat::Json {
        output::print_json(&dispatcher.history());
    }

    match result {
        DispatchResult::Delivered => {
            if format == OutputFormat::Table {
                output::print_success(&format!("Notification '{}' submitted", message.title));
            }
            Ok(())
        }
        DispatchResult::Failed(reason) => Err(AppError::new(
            ErrorKind::Network,
            format!("Notification not delivered: {reason}. Run the command again to retry."),
        )),
    }
}
