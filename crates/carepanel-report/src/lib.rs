//! # carepanel-report
//!
//! Paginated, filterable retrieval of the productivity report.
//!
//! - [`ReportFetcher`] issues page queries and applies only the response to
//!   the most recent request, exposing loading / empty / error state through
//!   [`FetchSnapshot`].
//! - [`PaginationController`] owns the page index and turns navigation into
//!   fetches, clamping anything out of range.

pub mod controller;
pub mod error;
pub mod fetcher;
pub mod query;

pub use controller::PaginationController;
pub use error::FetchError;
pub use fetcher::{FetchSnapshot, PendingFetch, ReportFetcher};
pub use query::ReportQuery;
