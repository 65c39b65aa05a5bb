//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Maximum page size accepted from the client
    pub const MAX_PER_PAGE: u32 = 100;

    /// Clamp client-supplied values into a usable range
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Number of rows to skip for this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            ((total_items + u64::from(pagination.per_page) - 1) / u64::from(pagination.per_page))
                as u32
        };
        Self {
            page: pagination.page,
            per_page: pagination.per_page,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let p = Pagination {
            page: 0,
            per_page: 1000,
        }
        .clamped();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, Pagination::MAX_PER_PAGE);
    }

    #[test]
    fn pagination_offset_skips_previous_pages() {
        let p = Pagination {
            page: 3,
            per_page: 25,
        };
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn meta_rounds_total_pages_up() {
        let p = Pagination {
            page: 1,
            per_page: 20,
        };
        let meta = PaginationMeta::new(&p, 41);
        assert_eq!(meta.total_pages, 3);

        let empty = PaginationMeta::new(&p, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
