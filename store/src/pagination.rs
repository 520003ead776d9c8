//! List pagination.

use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A page request: 1-based page number plus page size.
#[derive(Clone, Copy, Debug)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Items per page.
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// SQL OFFSET for this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.number.saturating_sub(1)) * i64::from(self.size)
    }

    /// SQL LIMIT for this page.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus the total row count.
#[derive(Clone, Debug, Serialize)]
pub struct Paginated<T> {
    /// Total number of matching rows, across all pages.
    pub count: i64,
    /// The rows for this page.
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Map the results, keeping the count.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_zero_offset() {
        let page = Page::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn offset_grows_with_page_number() {
        let page = Page { number: 3, size: 10 };
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn page_zero_is_clamped_to_first() {
        let page = Page { number: 0, size: 10 };
        assert_eq!(page.offset(), 0);
    }
}
