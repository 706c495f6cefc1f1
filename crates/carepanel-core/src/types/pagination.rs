//! Pagination state for the report view.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Current page position plus the totals needed to bound navigation.
///
/// Invariant: `page_index < max(page_count, 1)`. Every mutator clamps
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    page_index: u64,
    page_size: u64,
    total_count: u64,
}

impl PaginationState {
    /// Start on the first page with no known rows.
    pub fn new(page_size: u64) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Total rows across all pages, as last reported by the backend.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// `ceil(total_count / page_size)`.
    pub fn page_count(&self) -> u64 {
        self.total_count.div_ceil(self.page_size)
    }

    /// Highest valid page index (`0` when there are no pages).
    pub fn last_index(&self) -> u64 {
        self.page_count().saturating_sub(1)
    }

    /// Clamp an arbitrary index into the valid range.
    pub fn clamp(&self, index: u64) -> u64 {
        index.min(self.last_index())
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_index < self.last_index()
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Record a new total and pull the current index back into range.
    pub fn set_total_count(&mut self, total_count: u64) {
        self.total_count = total_count;
        self.page_index = self.clamp(self.page_index);
    }

    /// Move to `index` (clamped). Returns the new index if it changed.
    pub fn go_to(&mut self, index: u64) -> Option<u64> {
        let target = self.clamp(index);
        if target == self.page_index {
            return None;
        }
        self.page_index = target;
        Some(target)
    }

    /// Move forward one page if possible.
    pub fn next(&mut self) -> Option<u64> {
        self.go_to(self.page_index.saturating_add(1))
    }

    /// Move back one page if possible.
    pub fn previous(&mut self) -> Option<u64> {
        self.go_to(self.page_index.saturating_sub(1))
    }

    /// Return to the first page without reporting a change.
    pub fn reset(&mut self) {
        self.page_index = 0;
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_total(total: u64) -> PaginationState {
        let mut state = PaginationState::new(10);
        state.set_total_count(total);
        state
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(with_total(0).page_count(), 0);
        assert_eq!(with_total(1).page_count(), 1);
        assert_eq!(with_total(10).page_count(), 1);
        assert_eq!(with_total(25).page_count(), 3);
    }

    #[test]
    fn test_next_clamps_at_last_page() {
        let mut state = with_total(25);
        assert_eq!(state.go_to(2), Some(2));
        assert_eq!(state.next(), None);
        assert_eq!(state.page_index(), 2);
    }

    #[test]
    fn test_previous_clamps_at_first_page() {
        let mut state = with_total(25);
        assert_eq!(state.previous(), None);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_go_to_out_of_range_clamps() {
        let mut state = with_total(25);
        assert_eq!(state.go_to(99), Some(2));
        assert_eq!(state.go_to(u64::MAX), None);
        assert_eq!(state.page_index(), 2);
    }

    #[test]
    fn test_no_pages_pins_index_to_zero() {
        let mut state = with_total(0);
        assert_eq!(state.go_to(5), None);
        assert_eq!(state.next(), None);
        assert_eq!(state.page_index(), 0);
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn test_shrinking_total_pulls_index_back() {
        let mut state = with_total(95);
        state.go_to(9);
        state.set_total_count(30);
        assert_eq!(state.page_index(), 2);
    }

    #[test]
    fn test_zero_page_size_is_raised_to_one() {
        let state = PaginationState::new(0);
        assert_eq!(state.page_size(), 1);
    }
}
