//! Pagination query parameters.

use serde::Deserialize;
use tnt_store::pagination::{Page, DEFAULT_PAGE_SIZE};

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// `?page=` / `?page_size=` query parameters, both optional.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Items per page; defaults to 10, capped at [`MAX_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

impl PageQuery {
    /// Resolve into a store [`Page`], clamping nonsense values.
    #[must_use]
    pub fn resolve(self) -> Page {
        Page {
            number: self.page.unwrap_or(1).max(1),
            size: self
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = PageQuery::default().resolve();
        assert_eq!(page.number, 1);
        assert_eq!(page.size, 10);
    }

    #[test]
    fn clamps_size_and_number() {
        let page = PageQuery {
            page: Some(0),
            page_size: Some(10_000),
        }
        .resolve();
        assert_eq!(page.number, 1);
        assert_eq!(page.size, MAX_PAGE_SIZE);
    }
}
