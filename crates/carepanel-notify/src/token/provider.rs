//! Push provider seam and the HTTP-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::debug;

use carepanel_core::config::PermissionPolicy;
use carepanel_core::types::NotificationToken;
use carepanel_transport::{Method, Transport};

use crate::error::TokenError;

/// Operator answer to a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// Notifications allowed.
    Granted,
    /// Notifications refused.
    Denied,
}

/// Capabilities the dashboard consumes from a push-messaging provider.
#[async_trait]
pub trait PushProvider: Send + Sync + 'static {
    /// Ask for permission to deliver notifications.
    async fn request_permission(&self) -> PermissionDecision;

    /// Obtain a delivery token bound to `public_key`.
    async fn get_token(&self, public_key: &str) -> Result<NotificationToken, TokenError>;

    /// Channel on which the provider announces token rotation, if it has one.
    fn subscribe_rotations(&self) -> Option<broadcast::Receiver<()>> {
        None
    }
}

/// Source of permission decisions.
#[async_trait]
pub trait PermissionPrompt: Send + Sync + 'static {
    /// Ask once and report the answer.
    async fn ask(&self) -> PermissionDecision;
}

/// Always answers with the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub PermissionDecision);

#[async_trait]
impl PermissionPrompt for FixedPermission {
    async fn ask(&self) -> PermissionDecision {
        self.0
    }
}

impl FixedPermission {
    /// Decision for a non-interactive policy; `None` for [`PermissionPolicy::Prompt`].
    pub fn from_policy(policy: PermissionPolicy) -> Option<Self> {
        match policy {
            PermissionPolicy::Granted => Some(Self(PermissionDecision::Granted)),
            PermissionPolicy::Denied => Some(Self(PermissionDecision::Denied)),
            PermissionPolicy::Prompt => None,
        }
    }
}

/// Provider that registers for delivery tokens through the data API.
///
/// HTTP offers no push channel, so rotation is only observed when a later
/// issuance returns a different value.
pub struct HttpPushProvider {
    transport: Arc<dyn Transport>,
    registration_path: String,
    prompt: Arc<dyn PermissionPrompt>,
}

impl HttpPushProvider {
    /// Create a provider posting registrations to `registration_path`.
    pub fn new(
        transport: Arc<dyn Transport>,
        registration_path: impl Into<String>,
        prompt: Arc<dyn PermissionPrompt>,
    ) -> Self {
        Self {
            transport,
            registration_path: registration_path.into(),
            prompt,
        }
    }
}

#[async_trait]
impl PushProvider for HttpPushProvider {
    async fn request_permission(&self) -> PermissionDecision {
        self.prompt.ask().await
    }

    async fn get_token(&self, public_key: &str) -> Result<NotificationToken, TokenError> {
        let body = json!({ "publicKey": public_key });
        let response = self
            .transport
            .send(Method::POST, &self.registration_path, Some(&body))
            .await
            .map_err(|e| TokenError::Issuance(e.to_string()))?;
        let payload = response
            .into_success()
            .map_err(|e| TokenError::Issuance(e.to_string()))?;

        let token = payload
            .get("token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TokenError::Issuance("registration response carried no token".into()))?;

        debug!("Delivery token issued by provider");
        Ok(NotificationToken::new(token))
    }
}
