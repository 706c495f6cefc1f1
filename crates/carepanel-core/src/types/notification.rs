//! Operator-composed notifications and their delivery outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A notification composed by the dashboard operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NotificationMessage {
    /// Headline shown by the device. Must contain visible characters.
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    /// Body text; may be empty.
    #[serde(default)]
    pub body: String,
}

impl NotificationMessage {
    /// Compose a message. Validation happens at dispatch time.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("title must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Outcome of a single dispatch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DispatchResult {
    /// The backend acknowledged the notification.
    Delivered,
    /// The submission failed; the reason is operator-facing text.
    Failed(String),
}

impl DispatchResult {
    /// Whether the submission was acknowledged.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// A dispatch outcome kept for transient display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Identifier of the submission.
    pub submission_id: Uuid,
    /// Title of the submitted message.
    pub title: String,
    /// What happened.
    pub result: DispatchResult,
    /// When the submission was made.
    pub submitted_at: DateTime<Utc>,
}
