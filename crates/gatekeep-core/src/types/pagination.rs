//! Pagination types for history listings.

use serde::{Deserialize, Serialize};

/// Upper bound on any requested page size.
const MAX_PAGE_SIZE: u64 = 100;

/// A 1-based page request with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip (the SQL `OFFSET`). Saturates rather than
    /// overflowing for absurd page numbers.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of items to take (the SQL `LIMIT`).
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// A page of items plus the totals needed to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (0 when there are no items).
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Build a page from its items and the overall item count.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages: total_items.div_ceil(request.page_size),
        }
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Convert every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_clamping() {
        let req = PageRequest::new(0, 10);
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);

        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);

        let req = PageRequest::new(1, 10_000);
        assert_eq!(req.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_saturates_for_huge_page() {
        let req = PageRequest::new(u64::MAX, 10);
        assert_eq!(req.offset(), u64::MAX);

        let page: PageResponse<u8> = PageResponse::new(vec![], req, 3);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: PageResponse<u8> = PageResponse::new(vec![], PageRequest::new(1, 10), 21);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());

        let empty: PageResponse<u8> = PageResponse::new(vec![], PageRequest::new(1, 10), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());
    }
}
