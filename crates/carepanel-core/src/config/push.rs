//! Push-messaging provider configuration.

use serde::{Deserialize, Serialize};

/// How notification permission is obtained when the operator asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    /// Ask the operator interactively.
    #[default]
    Prompt,
    /// Treat every permission request as granted.
    Granted,
    /// Treat every permission request as denied.
    Denied,
}

/// Push provider and dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Public (VAPID-style) key presented when requesting a delivery token.
    pub public_key: String,
    /// Path on the data API that issues delivery tokens.
    #[serde(default = "default_registration_path")]
    pub registration_path: String,
    /// Path on the data API that accepts notifications for delivery.
    #[serde(default = "default_dispatch_path")]
    pub dispatch_path: String,
    /// Permission decision source.
    #[serde(default)]
    pub permission: PermissionPolicy,
    /// Number of recent dispatch outcomes kept in memory.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            registration_path: default_registration_path(),
            dispatch_path: default_dispatch_path(),
            permission: PermissionPolicy::default(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_registration_path() -> String {
    "/push/tokens".to_string()
}

fn default_dispatch_path() -> String {
    "/push/notifications".to_string()
}

fn default_history_limit() -> usize {
    50
}
