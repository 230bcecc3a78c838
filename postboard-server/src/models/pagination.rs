//! Offset pagination types

use serde::Deserialize;

/// Maximum items per page
const MAX_PER_PAGE: i64 = 100;

/// Default items per page for post listings
pub const DEFAULT_PER_PAGE: i64 = 5;

/// Pagination parameters
///
/// `page` is 1-indexed and deliberately not validated: a zero or negative
/// page produces a negative offset, which the store treats as offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: i64,
    /// Items per page (1..=100)
    pub per_page: i64,
}

impl Pagination {
    /// Create pagination. Only `per_page` is clamped.
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number, echoed back as given
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

impl<T> Paginated<T> {
    /// `ceil(total / per_page)`; zero for an empty table.
    pub fn total_pages(&self) -> i64 {
        (self.total + self.per_page - 1) / self.per_page
    }
}

/// Query parameters for pagination.
///
/// `page` arrives as raw text so a non-numeric value falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
}

impl PaginationParams {
    /// Parsed page number, defaulting to 1 when absent or not an integer.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(params.page(), DEFAULT_PER_PAGE)
    }
}
