//! Page navigation over a [`ReportFetcher`].

use carepanel_core::types::{PaginationState, ReportFilter};

use crate::fetcher::{PendingFetch, ReportFetcher};

/// Holds the current page index and active filter, and issues a fetch for
/// every navigation that actually changes the page.
///
/// Totals come from the fetcher's most recent successful page, so bounds are
/// only as fresh as the last good response.
#[derive(Debug)]
pub struct PaginationController {
    fetcher: ReportFetcher,
    pagination: PaginationState,
    filter: ReportFilter,
}

impl PaginationController {
    /// Start at page 0 with no filter. Nothing is fetched until
    /// [`reload`](Self::reload) or [`set_filter`](Self::set_filter).
    pub fn new(fetcher: ReportFetcher) -> Self {
        let pagination = PaginationState::new(fetcher.page_size());
        Self {
            fetcher,
            pagination,
            filter: ReportFilter::new(),
        }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &ReportFetcher {
        &self.fetcher
    }

    /// Active filter.
    pub fn filter(&self) -> &ReportFilter {
        &self.filter
    }

    /// Pagination state with the latest known total.
    pub fn state(&mut self) -> PaginationState {
        self.sync_total();
        self.pagination
    }

    /// Navigate to `index`, clamped into range.
    ///
    /// Returns `None` when the clamped index equals the current one.
    #[must_use = "await the fetch to observe its outcome"]
    pub fn go_to(&mut self, index: u64) -> Option<PendingFetch> {
        self.sync_total();
        let target = self.pagination.go_to(index)?;
        Some(self.fetch(target))
    }

    /// Advance one page; `None` on the last page.
    #[must_use = "await the fetch to observe its outcome"]
    pub fn next(&mut self) -> Option<PendingFetch> {
        self.sync_total();
        let target = self.pagination.next()?;
        Some(self.fetch(target))
    }

    /// Go back one page; `None` on the first page.
    #[must_use = "await the fetch to observe its outcome"]
    pub fn previous(&mut self) -> Option<PendingFetch> {
        self.sync_total();
        let target = self.pagination.previous()?;
        Some(self.fetch(target))
    }

    /// Replace the filter and fetch its first page.
    #[must_use = "await the fetch to observe its outcome"]
    pub fn set_filter(&mut self, filter: ReportFilter) -> PendingFetch {
        self.filter = filter;
        self.pagination.reset();
        self.fetch(0)
    }

    /// Re-fetch the current page with the current filter.
    #[must_use = "await the fetch to observe its outcome"]
    pub fn reload(&mut self) -> PendingFetch {
        self.fetch(self.pagination.page_index())
    }

    fn fetch(&self, page_index: u64) -> PendingFetch {
        self.fetcher.fetch_page(self.filter.clone(), page_index)
    }

    fn sync_total(&mut self) {
        let snapshot = self.fetcher.snapshot();
        if let Some(page) = snapshot.page {
            self.pagination.set_total_count(page.total_count);
        }
    }
}
