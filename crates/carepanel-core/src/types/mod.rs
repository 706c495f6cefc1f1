//! Core type definitions used across the CarePanel workspace.

pub mod filter;
pub mod notification;
pub mod pagination;
pub mod report;
pub mod token;

pub use filter::{FilterValue, ReportFilter};
pub use notification::{DispatchRecord, DispatchResult, NotificationMessage};
pub use pagination::PaginationState;
pub use report::{ReportPage, ReportRow};
pub use token::{CachedToken, NotificationToken, TokenState};
