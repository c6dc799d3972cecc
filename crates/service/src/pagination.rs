//! Pagination utilities for the service layer.
//!
//! `Pagination` normalizes page inputs; `Page` is the list-response envelope
//! every paginated endpoint returns.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,
    /// items per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl Pagination {
    /// Clamp to sane bounds and convert to an `(offset, limit)` pair.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let page_size = self.page_size.clamp(1, 100);
        ((page - 1) as u64 * page_size as u64, page_size as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}

/// Paginated response envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(params: Pagination, total: u64, data: Vec<T>) -> Self {
        let page = if params.page == 0 { 1 } else { params.page };
        let page_size = params.page_size.clamp(1, 100);
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size as u64 - 1) / page_size as u64
        };
        Self { page, page_size, total, total_pages, data }
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, Pagination};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (offset, limit) = Pagination { page: 0, page_size: 0 }.normalize();
        assert_eq!(offset, 0);
        assert_eq!(limit, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (offset, limit) = Pagination { page: 5, page_size: 1000 }.normalize();
        assert_eq!(offset, 400);
        assert_eq!(limit, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.page_size, 10);
    }

    #[test]
    fn envelope_rounds_total_pages_up() {
        let p = Pagination { page: 1, page_size: 10 };
        let page = Page::new(p, 25, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 3);

        let exact = Page::new(p, 30, Vec::<i32>::new());
        assert_eq!(exact.total_pages, 3);
    }

    #[test]
    fn envelope_empty_has_zero_pages() {
        let page = Page::<i32>::new(Pagination::default(), 0, vec![]);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }
}
