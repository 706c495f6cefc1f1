//! Transport-level errors.

use carepanel_core::error::{AppError, ErrorKind};

/// Errors from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, TLS, reset, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {payload}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the backend.
        payload: serde_json::Value,
    },
}

impl TransportError {
    /// Map a reqwest failure, keeping timeouts recognisable.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }

    /// HTTP status, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        let kind = match &err {
            TransportError::Network(_) => ErrorKind::Network,
            TransportError::Http { .. } => ErrorKind::Http,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
