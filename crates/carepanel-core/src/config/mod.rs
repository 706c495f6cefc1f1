//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional explicit file, and `CAREPANEL__`
//! environment variables. Each sub-module represents a logical section.

pub mod api;
pub mod logging;
pub mod push;
pub mod report;
pub mod token_cache;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::push::{PermissionPolicy, PushConfig};
pub use self::report::ReportConfig;
pub use self::token_cache::TokenCacheConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend data API settings.
    pub api: ApiConfig,
    /// Push-messaging provider settings.
    pub push: PushConfig,
    /// Productivity report settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Durable notification token cache settings.
    #[serde(default)]
    pub token_cache: TokenCacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration.
    ///
    /// Merges `config/default.toml` (if present), the file at `path` (if
    /// present), and environment variables prefixed with `CAREPANEL__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CAREPANEL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the core cannot safely operate with.
    ///
    /// Blank credentials are refused outright instead of being sent.
    pub fn validate(&self) -> Result<(), AppError> {
        require("api.base_url", &self.api.base_url)?;
        require("api.api_key", &self.api.api_key)?;
        require("api.api_key_header", &self.api.api_key_header)?;
        require("push.public_key", &self.push.public_key)?;

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(AppError::configuration(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.report.page_size == 0 {
            return Err(AppError::configuration("report.page_size must be positive"));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration("api.timeout_seconds must be positive"));
        }
        Ok(())
    }
}

fn require(name: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::configuration(format!(
            "Required setting '{name}' is missing or empty"
        )));
    }
    Ok(())
}
