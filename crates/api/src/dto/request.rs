//! Deserialized request bodies and query parameters, with conversion
//! into validated workflow inputs.

use robomart_workflow::ports::{
    OrderListRequest, OrderSortField, Pagination, ProductListRequest, ProductSortField,
    SearchFilter, SearchMatch, SortOrder,
};
use serde::Deserialize;

use crate::errors::ApiError;

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrdersRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}

// =============================================================================
// Robot
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePlanRequest {
    pub robot_id: String,
    pub capacity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// =============================================================================
// Listing Query
// =============================================================================

/// Common listing query parameters:
/// `?search=…&type=prefix&sort=created_at&order=desc&page=0&page_size=20`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub match_kind: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListQuery {
    pub fn into_order_request(self) -> Result<OrderListRequest, ApiError> {
        let sort_field = match self.sort.as_deref() {
            None | Some("order_id") => OrderSortField::OrderId,
            Some("product_name") => OrderSortField::ProductName,
            Some("created_at") => OrderSortField::CreatedAt,
            Some("shipped_status") => OrderSortField::ShippedStatus,
            Some("arrived_at") => OrderSortField::ArrivedAt,
            Some(other) => {
                return Err(ApiError::validation(format!(
                    "unknown sort field '{}'",
                    other
                )))
            }
        };
        let (search, sort_order, pagination) = self.common_parts()?;

        Ok(OrderListRequest {
            search,
            sort_field,
            sort_order,
            pagination,
        })
    }

    pub fn into_product_request(self) -> Result<ProductListRequest, ApiError> {
        let sort_field = match self.sort.as_deref() {
            None | Some("product_id") => ProductSortField::ProductId,
            Some("name") => ProductSortField::Name,
            Some("value") => ProductSortField::Value,
            Some("weight") => ProductSortField::Weight,
            Some(other) => {
                return Err(ApiError::validation(format!(
                    "unknown sort field '{}'",
                    other
                )))
            }
        };
        let (search, sort_order, pagination) = self.common_parts()?;

        Ok(ProductListRequest {
            search,
            sort_field,
            sort_order,
            pagination,
        })
    }

    fn common_parts(self) -> Result<(Option<SearchFilter>, SortOrder, Pagination), ApiError> {
        let match_kind = match self.match_kind.as_deref() {
            None | Some("partial") => SearchMatch::Partial,
            Some("prefix") => SearchMatch::Prefix,
            Some(other) => {
                return Err(ApiError::validation(format!(
                    "unknown search type '{}'",
                    other
                )))
            }
        };
        let search = self
            .search
            .filter(|term| !term.is_empty())
            .map(|term| SearchFilter::new(term, match_kind));

        let sort_order = match self.order.as_deref() {
            None | Some("asc") => SortOrder::Ascending,
            Some("desc") => SortOrder::Descending,
            Some(other) => {
                return Err(ApiError::validation(format!(
                    "unknown sort order '{}'",
                    other
                )))
            }
        };

        let pagination = Pagination::new(
            self.page.unwrap_or(0),
            self.page_size.unwrap_or(Pagination::default().page_size),
        );

        Ok((search, sort_order, pagination))
    }
}

// =============================================================================
// Tests
// =============================================================================
