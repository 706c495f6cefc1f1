//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use carepanel_core::config::AppConfig;
use carepanel_core::error::AppError;
use carepanel_core::AppResult;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Load and validate configuration, printing a redacted summary
    Check,
}

/// Configuration summary safe to print: credentials are masked.
#[derive(Debug, Serialize)]
struct ConfigSummary {
    base_url: String,
    api_key: String,
    public_key: String,
    report_path: String,
    page_size: u64,
    permission: String,
    token_cache: String,
    log_level: String,
}

impl ConfigSummary {
    fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            api_key: mask(&config.api.api_key),
            public_key: mask(&config.push.public_key),
            report_path: config.report.path.clone(),
            page_size: config.report.page_size,
            permission: format!("{:?}", config.push.permission).to_lowercase(),
            token_cache: config.token_cache.provider.clone(),
            log_level: config.logging.level.clone(),
        }
    }
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    loaded: AppResult<AppConfig>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Check => {
            let config = loaded?;
            let summary = ConfigSummary::new(&config);
            match format {
                OutputFormat::Json => output::print_json(&summary),
                OutputFormat::Table => {
                    output::print_success(&format!("Configuration '{config_path}' is valid"));
                    output::print_kv("API", &summary.base_url);
                    output::print_kv("API key", &summary.api_key);
                    output::print_kv("Push public key", &summary.public_key);
                    output::print_kv(
                        "Report",
                        &format!("{} ({} per page)", summary.report_path, summary.page_size),
                    );
                    output::print_kv("Permission", &summary.permission);
                    output::print_kv("Token cache", &summary.token_cache);
                    output::print_kv("Log level", &summary.log_level);
                }
            }
        }
    }

    Ok(())
}

/// Keep the first four characters of a long secret; hide short ones entirely.
fn mask(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
