use robomart_domain::product::{Product, ProductId};

use crate::errors::WorkflowError;
use crate::ports::{Page, ProductCatalog, ProductListRequest};

const MAX_PAGE_SIZE: u32 = 100;

/// Lists the product catalogue with query-side filtering and
/// pagination.
///
/// # Errors
///
/// Returns [`WorkflowError::InvalidArgument`] for out-of-range page
/// sizes and [`WorkflowError::Storage`] on query failure.
pub async fn list_products<C: ProductCatalog>(
    catalog: &C,
    request: ProductListRequest,
) -> Result<Page<Product>, WorkflowError> {
    let page_size = request.pagination.page_size;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(WorkflowError::invalid_argument(format!(
            "page_size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, page_size
        )));
    }

    Ok(catalog.list_products(&request).await?)
}

/// Looks up one product.
///
/// # Errors
///
/// Returns [`WorkflowError::NotFound`] when the product does not exist.
pub async fn get_product<C: ProductCatalog>(
    catalog: &C,
    product_id: ProductId,
) -> Result<Product, WorkflowError> {
    catalog
        .find_product(product_id)
        .await?
        .ok_or_else(|| WorkflowError::not_found("Product", product_id.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
