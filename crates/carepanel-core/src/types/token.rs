//! Notification delivery token and its lifecycle states.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque push delivery credential.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationToken(String);

impl NotificationToken {
    /// Wrap a provider-issued token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix that is safe to log.
    pub fn fingerprint(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for NotificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NotificationToken")
            .field(&self.fingerprint())
            .finish()
    }
}

/// Lifecycle of the notification token.
///
/// `Unrequested → PermissionDenied | PermissionGranted → Issued → Stale`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenState {
    /// Permission has not been asked for yet.
    #[default]
    Unrequested,
    /// The operator refused notifications.
    PermissionDenied,
    /// Permission granted but no token is held (issuance pending or failed).
    PermissionGranted,
    /// A usable token is cached.
    Issued(NotificationToken),
    /// The provider invalidated the previous token; re-issuance required.
    Stale,
}

impl TokenState {
    /// The token, only when it may be used for dispatch.
    pub fn token(&self) -> Option<&NotificationToken> {
        match self {
            Self::Issued(token) => Some(token),
            _ => None,
        }
    }

    /// Short state name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unrequested => "unrequested",
            Self::PermissionDenied => "permission_denied",
            Self::PermissionGranted => "permission_granted",
            Self::Issued(_) => "issued",
            Self::Stale => "stale",
        }
    }
}

/// Durable form of an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    /// The token.
    pub token: NotificationToken,
    /// When the provider issued it.
    pub issued_at: DateTime<Utc>,
}

impl CachedToken {
    /// Record a freshly issued token.
    pub fn issued_now(token: NotificationToken) -> Self {
        Self {
            token,
            issued_at: Utc::now(),
        }
    }
}
