// ABOUTME: Page window for the admin listing, clamped once at construction
// ABOUTME: Also the page metadata returned next to each listing

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A 1-based page and a page size inside `1..=MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: i64,
    limit: i64,
}

impl PageWindow {
    /// Missing values fall back to page 1 and the default size; out-of-range ones are clamped
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(window: &PageWindow, total: i64) -> Self {
        let total_pages = (total + window.limit - 1) / window.limit;
        Self {
            page: window.page,
            limit: window.limit,
            total,
            total_pages,
            has_next_page: window.page < total_pages,
            has_previous_page: window.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_values_use_first_page() {
        let window = PageWindow::from_query(None, None);
        assert_eq!((window.page(), window.limit(), window.offset()), (1, 20, 0));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(PageWindow::from_query(Some(-5), Some(10)).offset(), 0);
        assert_eq!(PageWindow::from_query(Some(1), Some(500)).limit(), MAX_PAGE_SIZE);
        assert_eq!(PageWindow::from_query(Some(1), Some(0)).limit(), 1);
        assert_eq!(PageWindow::from_query(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn test_meta_for_middle_and_empty_pages() {
        let meta = PaginationMeta::new(&PageWindow::from_query(Some(2), None), 45);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_previous_page);

        let empty = PaginationMeta::new(&PageWindow::from_query(None, None), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
        assert!(!empty.has_previous_page);
    }
}
