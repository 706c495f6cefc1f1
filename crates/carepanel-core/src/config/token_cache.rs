//! Notification token cache configuration.

use serde::{Deserialize, Serialize};

/// Durable token cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCacheConfig {
    /// Cache provider type: `"memory"` or `"file"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Location of the cache file when `provider = "file"`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_path() -> String {
    "data/push-token.json".to_string()
}
