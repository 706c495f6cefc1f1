//! Token lifecycle and dispatch errors.

use carepanel_core::error::{AppError, ErrorKind};

/// Why a delivery token is not available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Permission has never been requested in this session.
    #[error("notification permission has not been requested")]
    PermissionRequired,

    /// The operator denied notification permission.
    #[error("notification permission was denied")]
    PermissionDenied,

    /// The push provider was unreachable or refused to issue a token.
    #[error("token issuance failed: {0}")]
    Issuance(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let kind = match &err {
            TokenError::PermissionRequired | TokenError::PermissionDenied => {
                ErrorKind::PermissionDenied
            }
            TokenError::Issuance(_) => ErrorKind::TokenIssuance,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

/// Pre-flight failures that stop a dispatch before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The composed message is malformed.
    #[error("invalid notification: {0}")]
    Validation(String),

    /// No issued delivery token is available.
    #[error("no notification token has been issued")]
    NoToken,
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        let kind = match &err {
            DispatchError::Validation(_) => ErrorKind::Validation,
            DispatchError::NoToken => ErrorKind::NoToken,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
