//! Report page fetching with latest-request-wins semantics.
//!
//! Every call to [`ReportFetcher::fetch_page`] takes a fresh sequence number
//! at call time, before any I/O. When a response arrives it is applied only
//! if its sequence number is still the newest; otherwise it is dropped and the
//! caller receives [`FetchError::Superseded`]. Responses may therefore resolve
//! in any order without a stale page ever replacing a newer one.
//!
//! The I/O runs on a spawned task, so a request is sent and its outcome is
//! applied whether or not the caller awaits the returned future.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use carepanel_core::config::ReportConfig;
use carepanel_core::types::{ReportFilter, ReportPage};
use carepanel_transport::{Method, Transport};

use crate::error::FetchError;
use crate::query::{ReportQuery, decode_page};

/// Outcome of a fetch that has been issued, sequenced and spawned.
pub type PendingFetch = BoxFuture<'static, Result<ReportPage, FetchError>>;

/// Observable state of the fetcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchSnapshot {
    /// Most recent successfully applied page.
    pub page: Option<ReportPage>,
    /// A request for the active filter and page is outstanding.
    pub loading: bool,
    /// Failure of the most recent request, if it failed.
    pub error: Option<FetchError>,
}

impl FetchSnapshot {
    /// The current page, or an empty page when nothing has loaded yet.
    pub fn page_or_empty(&self) -> ReportPage {
        self.page.clone().unwrap_or_else(|| ReportPage::empty(0))
    }

    /// Total row count reported by the last successful page.
    pub fn total_count(&self) -> u64 {
        self.page.as_ref().map_or(0, |page| page.total_count)
    }

    /// The backend successfully reported zero matching rows.
    ///
    /// Never true while loading or after a failure, so "no data" and
    /// "could not load" stay distinguishable.
    pub fn is_empty(&self) -> bool {
        !self.loading
            && self.error.is_none()
            && self.page.as_ref().is_some_and(ReportPage::is_empty)
    }
}

#[derive(Default)]
struct FetchState {
    issued: u64,
    snapshot: FetchSnapshot,
}

struct Inner {
    transport: Arc<dyn Transport>,
    path: String,
    page_size: u64,
    state: Mutex<FetchState>,
}

/// Fetches report pages from the backend.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct ReportFetcher {
    inner: Arc<Inner>,
}

impl fmt::Debug for ReportFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFetcher")
            .field("path", &self.inner.path)
            .field("page_size", &self.inner.page_size)
            .finish_non_exhaustive()
    }
}

impl ReportFetcher {
    /// Create a fetcher querying `path` with a fixed page size (minimum 1).
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>, page_size: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                path: path.into(),
                page_size: page_size.max(1),
                state: Mutex::new(FetchState::default()),
            }),
        }
    }

    /// Create a fetcher from the `report` config section.
    pub fn from_config(transport: Arc<dyn Transport>, config: &ReportConfig) -> Self {
        Self::new(transport, config.path.clone(), config.page_size)
    }

    /// Rows requested per page.
    pub fn page_size(&self) -> u64 {
        self.inner.page_size
    }

    /// Current state.
    pub fn snapshot(&self) -> FetchSnapshot {
        self.inner.lock().snapshot.clone()
    }

    /// Issue a query for one page.
    ///
    /// The request is sequenced immediately, marks the fetcher as loading and
    /// starts on the current tokio runtime. The returned future only reports
    /// the outcome; dropping it does not cancel the request.
    #[must_use = "the request runs regardless; await the future to observe its outcome"]
    pub fn fetch_page(&self, filter: ReportFilter, page_index: u64) -> PendingFetch {
        let sequence = self.inner.begin(&filter, page_index);
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = inner.query(&filter, page_index).await;
            inner.complete(sequence, result)
        });

        let inner = Arc::clone(&self.inner);
        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => inner.complete(sequence, Err(FetchError::Interrupted(e.to_string()))),
            }
        }
        .boxed()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, FetchState> {
        // State is replaced in single assignments, so a poisoned guard is
        // still consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, filter: &ReportFilter, page_index: u64) -> u64 {
        let mut state = self.lock();
        state.issued += 1;
        state.snapshot.loading = true;
        debug!(
            sequence = state.issued,
            page_index,
            filtered = !filter.is_unfiltered(),
            "Issuing report query"
        );
        state.issued
    }

    async fn query(
        &self,
        filter: &ReportFilter,
        page_index: u64,
    ) -> Result<ReportPage, FetchError> {
        let body = serde_json::to_value(ReportQuery {
            filter,
            page_index,
            page_size: self.page_size,
        })
        .map_err(|e| FetchError::Decode(e.to_string()))?;
        let response = self
            .transport
            .send(Method::POST, &self.path, Some(&body))
            .await?;
        let payload: Value = response.into_success()?;
        decode_page(payload, page_index)
    }

    fn complete(
        &self,
        sequence: u64,
        result: Result<ReportPage, FetchError>,
    ) -> Result<ReportPage, FetchError> {
        let mut state = self.lock();
        if sequence != state.issued {
            debug!(sequence, latest = state.issued, "Discarding superseded report response");
            return Err(FetchError::Superseded { sequence });
        }

        state.snapshot.loading = false;
        match &result {
            Ok(page) => {
                debug!(
                    sequence,
                    page_index = page.page_index,
                    rows = page.rows.len(),
                    total_count = page.total_count,
                    "Report page applied"
                );
                state.snapshot.page = Some(page.clone());
                state.snapshot.error = None;
            }
            Err(e) => {
                warn!(sequence, error = %e, "Report query failed");
                state.snapshot.error = Some(e.clone());
            }
        }
        result
    }
}
