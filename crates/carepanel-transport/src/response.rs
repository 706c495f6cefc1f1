//! Raw responses returned by the transport.

use serde_json::Value;

use crate::error::TransportError;

/// Status and body of a completed request, not yet interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body as JSON. Empty bodies are `null`; non-JSON text is a JSON string.
    pub body: Value,
}

impl TransportResponse {
    /// Build a response.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Return the body, or [`TransportError::Http`] for a non-2xx status.
    pub fn into_success(self) -> Result<Value, TransportError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(TransportError::Http {
                status: self.status,
                payload: self.body,
            })
        }
    }

    /// Decode a raw body the way the backend sends it.
    pub(crate) fn decode_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }
}
