//! Convenience result type alias for CarePanel.

use crate::error::AppError;

/// A specialized `Result` type for CarePanel operations.
pub type AppResult<T> = Result<T, AppError>;
