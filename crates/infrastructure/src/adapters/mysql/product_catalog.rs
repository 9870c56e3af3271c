//! MySQL implementation of the product catalogue read model.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use robomart_domain::product::{Product, ProductId};
use robomart_workflow::ports::{
    Page, ProductCatalog, ProductListRequest, ProductSortField, SearchFilter, SearchMatch,
    StoreError,
};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, QueryBuilder, Row};

use super::MySqlPool;
use crate::adapters::memory::MemoryCache;
use crate::errors::map_sqlx_error;

// The catalogue changes rarely; counts can live a little longer than
// order counts.
const COUNT_CACHE_TTL: Duration = Duration::from_secs(30);

// =============================================================================
// MySqlProductCatalog
// =============================================================================

#[derive(Clone)]
pub struct MySqlProductCatalog {
    pool: MySqlPool,
    count_cache: Arc<MemoryCache<u64>>,
}

impl MySqlProductCatalog {
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            count_cache: Arc::new(MemoryCache::new()),
        }
    }
}

#[async_trait]
impl ProductCatalog for MySqlProductCatalog {
    async fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> Result<Page<Product>, StoreError> {
        let cache_key = count_cache_key(request.search.as_ref());
        let total = match self.count_cache.get(&cache_key) {
            Some(total) => total,
            None => {
                let mut builder: QueryBuilder<MySql> =
                    QueryBuilder::new("SELECT COUNT(*) FROM products WHERE 1 = 1");
                push_search_filter(&mut builder, request.search.as_ref());

                let row = builder
                    .build()
                    .fetch_one(self.pool.as_inner())
                    .await
                    .map_err(|error| map_sqlx_error("list_products", error))?;
                let total: i64 = row
                    .try_get(0)
                    .map_err(|error| map_sqlx_error("list_products", error))?;
                let total = total as u64;

                self.count_cache.set(cache_key, total, COUNT_CACHE_TTL);
                total
            }
        };

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT product_id, name, description, value, weight, image \
             FROM products WHERE 1 = 1",
        );
        push_search_filter(&mut builder, request.search.as_ref());
        builder.push(order_by_clause(request.sort_field, request.sort_order.as_sql()));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(request.pagination.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(request.pagination.offset() as i64);

        let rows = builder
            .build()
            .fetch_all(self.pool.as_inner())
            .await
            .map_err(|error| map_sqlx_error("list_products", error))?;

        let items = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total, request.pagination))
    }

    async fn find_product(&self, product_id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "SELECT product_id, name, description, value, weight, image \
             FROM products WHERE product_id = ?",
        )
        .bind(product_id.value())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| map_sqlx_error("find_product", error))?;

        row.as_ref().map(product_from_row).transpose()
    }
}

// =============================================================================
// Query Helpers
// =============================================================================

fn push_search_filter(builder: &mut QueryBuilder<MySql>, search: Option<&SearchFilter>) {
    if let Some(filter) = search {
        builder.push(" AND name LIKE ");
        let pattern = match filter.match_kind {
            SearchMatch::Prefix => format!("{}%", filter.term),
            SearchMatch::Partial => format!("%{}%", filter.term),
        };
        builder.push_bind(pattern);
    }
}

fn order_by_clause(field: ProductSortField, direction: &str) -> String {
    match field {
        ProductSortField::ProductId => format!(" ORDER BY product_id {}", direction),
        ProductSortField::Name => format!(" ORDER BY name {}, product_id ASC", direction),
        ProductSortField::Value => format!(" ORDER BY value {}, product_id ASC", direction),
        ProductSortField::Weight => format!(" ORDER BY weight {}, product_id ASC", direction),
    }
}

fn product_from_row(row: &MySqlRow) -> Result<Product, StoreError> {
    let operation = "list_products";

    let product_id: i64 = row
        .try_get("product_id")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let name: String = row
        .try_get("name")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let description: String = row
        .try_get("description")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let value: i64 = row
        .try_get("value")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let weight: i64 = row
        .try_get("weight")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let image: String = row
        .try_get("image")
        .map_err(|error| map_sqlx_error(operation, error))?;

    let product_id = ProductId::new(product_id)
        .map_err(|error| StoreError::storage(operation, error.to_string()))?;
    Product::new(product_id, name, description, value, weight, image)
        .map_err(|error| StoreError::storage(operation, error.to_string()))
}

fn count_cache_key(search: Option<&SearchFilter>) -> String {
    match search {
        None => "product_count:all".to_string(),
        Some(filter) => {
            let kind = match filter.match_kind {
                SearchMatch::Prefix => "prefix",
                SearchMatch::Partial => "partial",
            };
            format!("product_count:{}:{}", kind, filter.term)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use robomart_workflow::ports::SortOrder;
    use rstest::rstest;

    #[rstest]
    fn count_cache_key_distinguishes_filters() {
        assert_eq!(count_cache_key(None), "product_count:all");
        let filter = SearchFilter::new("ket", SearchMatch::Partial);
        assert_eq!(count_cache_key(Some(&filter)), "product_count:partial:ket");
    }

    #[rstest]
    fn name_sort_breaks_ties_by_product_id() {
        let clause = order_by_clause(ProductSortField::Name, SortOrder::Descending.as_sql());
        assert_eq!(clause, " ORDER BY name DESC, product_id ASC");
    }
}
