//! Page-number pagination for order listings.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of items per page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination query parameters (`?page=&page_size=`). Pages are 1-based.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    /// Clamp the requested page to `>= 1`.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Clamp the requested page size to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.page_size()
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

/// A single page of results plus the total count across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(params: &PageParams, count: i64, results: Vec<T>) -> Self {
        Self {
            count,
            page: params.page(),
            page_size: params.page_size(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_size_is_clamped() {
        let big = PageParams {
            page: None,
            page_size: Some(10_000),
        };
        assert_eq!(big.page_size(), MAX_PAGE_SIZE);

        let zero = PageParams {
            page: None,
            page_size: Some(0),
        };
        assert_eq!(zero.page_size(), 1);
    }

    #[test]
    fn offset_follows_page_number() {
        let params = PageParams {
            page: Some(3),
            page_size: Some(20),
        };
        assert_eq!(params.offset(), 40);

        let negative = PageParams {
            page: Some(-4),
            page_size: Some(20),
        };
        assert_eq!(negative.offset(), 0);
    }
}
