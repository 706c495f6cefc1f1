//! Notification dispatcher: validates, attaches the token, submits once.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use carepanel_core::types::{DispatchRecord, DispatchResult, NotificationMessage};
use carepanel_transport::{Method, Transport};

use crate::error::DispatchError;
use crate::token::TokenHandle;

use super::history::DispatchHistory;

/// Submits operator-composed notifications for delivery.
///
/// Each call makes at most one outbound request. Retrying is left to the
/// operator so a slow acknowledgment never turns into a duplicate delivery.
pub struct NotificationDispatcher {
    transport: Arc<dyn Transport>,
    tokens: TokenHandle,
    path: String,
    history: DispatchHistory,
}

impl NotificationDispatcher {
    /// Create a dispatcher posting to `path` with tokens read from `tokens`.
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: TokenHandle,
        path: impl Into<String>,
        history_limit: usize,
    ) -> Self {
        Self {
            transport,
            tokens,
            path: path.into(),
            history: DispatchHistory::new(history_limit),
        }
    }

    /// Submit `message` for delivery.
    ///
    /// Fails before any network call when the title is blank or no token is
    /// issued. Transport and HTTP failures come back as
    /// [`DispatchResult::Failed`]. The message is borrowed so the caller
    /// still holds it for a retry.
    pub async fn dispatch(
        &self,
        message: &NotificationMessage,
    ) -> Result<DispatchResult, DispatchError> {
        message
            .validate()
            .map_err(|e| DispatchError::Validation(e.to_string()))?;
        let token = self.tokens.current().ok_or(DispatchError::NoToken)?;

        let submission_id = Uuid::new_v4();
        let payload = json!({
            "token": token.as_str(),
            "notification": {
                "title": message.title,
                "body": message.body,
            },
        });

        let result = match self
            .transport
            .send(Method::POST, &self.path, Some(&payload))
            .await
            .and_then(|response| response.into_success())
        {
            Ok(_) => {
                info!(%submission_id, token = %token.fingerprint(), "Notification delivered");
                DispatchResult::Delivered
            }
            Err(e) => {
                warn!(%submission_id, error = %e, "Notification dispatch failed");
                DispatchResult::Failed(e.to_string())
            }
        };

        self.history.push(DispatchRecord {
            submission_id,
            title: message.title.clone(),
            result: result.clone(),
            submitted_at: Utc::now(),
        });
        Ok(result)
    }

    /// Recent submissions, newest first.
    pub fn history(&self) -> Vec<DispatchRecord> {
        self.history.recent()
    }
}
