//! Pagination utilities for service layer
//!
//! Normalizes raw page/limit input and wraps a page of results with totals.
use serde::Serialize;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Pagination parameters as received (may be out of range)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page: page.unwrap_or(1), limit: limit.unwrap_or(DEFAULT_LIMIT) }.normalize()
    }

    /// page < 1 becomes 1; limit <= 0 becomes the default; limit is capped.
    pub fn normalize(self) -> Self {
        let page = self.page.max(1);
        let limit = if self.limit <= 0 { DEFAULT_LIMIT } else { self.limit.min(MAX_LIMIT) };
        Self { page, limit }
    }

    /// Saturates, so an absurd page still yields an (empty) page instead of overflowing.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit).max(0) as u64
    }

    pub fn limit_u64(&self) -> u64 {
        self.limit as u64
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, limit: DEFAULT_LIMIT } }
}

/// One page of results plus the pre-pagination total.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, p: Pagination) -> Self {
        let limit = p.limit as u64;
        Self {
            items,
            total_count,
            page: p.page,
            limit: p.limit,
            total_pages: total_count.div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_out_of_range_to_defaults() {
        let p = Pagination { page: 0, limit: 0 }.normalize();
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        let p = Pagination { page: -3, limit: -5 }.normalize();
        assert_eq!(p, Pagination { page: 1, limit: 10 });
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let p = Pagination { page: 5, limit: 1000 }.normalize();
        assert_eq!(p.limit, 100);
        assert_eq!(p.offset(), 400);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let p = Pagination::new(Some(i64::MAX), Some(10));
        assert_eq!(p.offset(), i64::MAX as u64);
        let page: Page<u8> = Page::new(vec![], 25, p);
        assert_eq!(page.page, i64::MAX);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::new(Some(3), Some(10));
        let page: Page<u8> = Page::new(vec![0; 5], 25, p);
        assert_eq!(page.total_pages, 3);
        assert_eq!(p.offset(), 20);

        let empty: Page<u8> = Page::new(vec![], 0, Pagination::default());
        assert_eq!(empty.total_pages, 0);

        let exact: Page<u8> = Page::new(vec![], 20, Pagination::default());
        assert_eq!(exact.total_pages, 2);
    }
}
