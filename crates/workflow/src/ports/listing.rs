//! Listing request and result shapes shared by the directory ports.

use chrono::{DateTime, Utc};
use robomart_domain::order::{OrderId, OrderStatus};
use robomart_domain::product::ProductId;

// =============================================================================
// Pagination
// =============================================================================

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (0-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Pagination {
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Offset for `LIMIT ... OFFSET ...` queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.page_size as u64
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 20,
        }
    }
}

// =============================================================================
// Page
// =============================================================================

/// A page of results together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }
}

// =============================================================================
// Search
// =============================================================================

/// How a search term matches the product name column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMatch {
    /// `name LIKE 'term%'`
    Prefix,
    /// `name LIKE '%term%'`
    #[default]
    Partial,
}

/// A free-text filter over product names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub term: String,
    pub match_kind: SearchMatch,
}

impl SearchFilter {
    #[must_use]
    pub fn new(term: impl Into<String>, match_kind: SearchMatch) -> Self {
        Self {
            term: term.into(),
            match_kind,
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// SQL keyword for the direction.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Sortable columns of the order history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortField {
    #[default]
    OrderId,
    ProductName,
    CreatedAt,
    ShippedStatus,
    ArrivedAt,
}

/// Sortable columns of the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    ProductId,
    Name,
    Value,
    Weight,
}

// =============================================================================
// Requests
// =============================================================================

/// Parameters of an order history listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderListRequest {
    pub search: Option<SearchFilter>,
    pub sort_field: OrderSortField,
    pub sort_order: SortOrder,
    pub pagination: Pagination,
}

/// Parameters of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductListRequest {
    pub search: Option<SearchFilter>,
    pub sort_field: ProductSortField,
    pub sort_order: SortOrder,
    pub pagination: Pagination,
}

// =============================================================================
// OrderSummary
// =============================================================================

/// One row of the order history listing: the order joined with the name
/// of its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub shipped_status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub arrived_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod pagination {
        use super::*;

        #[rstest]
        fn offset_multiplies_page_by_size() {
            assert_eq!(Pagination::new(3, 20).offset(), 60);
        }

        #[rstest]
        fn default_is_first_page_of_twenty() {
            let pagination = Pagination::default();
            assert_eq!(pagination.page, 0);
            assert_eq!(pagination.page_size, 20);
        }
    }

    mod page {
        use super::*;

        #[rstest]
        #[case(100, 10, 10)]
        #[case(101, 10, 11)]
        #[case(0, 10, 0)]
        fn total_pages_rounds_up(#[case] total: u64, #[case] size: u32, #[case] expected: u64) {
            let page: Page<i32> = Page::new(Vec::new(), total, Pagination::new(0, size));
            assert_eq!(page.total_pages(), expected);
        }
    }

    mod sort_order {
        use super::*;

        #[rstest]
        fn as_sql_maps_directions() {
            assert_eq!(SortOrder::Ascending.as_sql(), "ASC");
            assert_eq!(SortOrder::Descending.as_sql(), "DESC");
        }
    }
}
