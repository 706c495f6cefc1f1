//! Report fetch errors.

use carepanel_core::error::{AppError, ErrorKind};
use carepanel_transport::TransportError;

/// Why a report page could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request failed at the network or HTTP level.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered 2xx with a body that is not a report page.
    #[error("malformed report response: {0}")]
    Decode(String),

    /// The task running the request panicked or was cancelled.
    #[error("report request interrupted: {0}")]
    Interrupted(String),

    /// A newer request was issued before this one completed; its response
    /// was not applied.
    #[error("request {sequence} superseded by a newer request")]
    Superseded {
        /// Sequence number of the discarded request.
        sequence: u64,
    },
}

impl FetchError {
    /// Whether this only reports that a newer request took over.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::with_source(ErrorKind::Fetch, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_display_transparently() {
        let err = FetchError::from(TransportError::Network("reset".into()));
        assert_eq!(err.to_string(), "network error: reset");
    }

    #[test]
    fn test_maps_to_fetch_kind() {
        let app: AppError = FetchError::Decode("missing rows".into()).into();
        assert_eq!(app.kind, ErrorKind::Fetch);
        assert!(!app.is_fatal());
    }
}
