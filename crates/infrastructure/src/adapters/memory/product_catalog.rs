//! In-memory product catalogue for tests and local development.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use robomart_domain::product::{Product, ProductId};
use robomart_workflow::ports::{
    Page, ProductCatalog, ProductListRequest, ProductSortField, SearchFilter, SearchMatch,
    SortOrder, StoreError,
};

// =============================================================================
// InMemoryProductCatalog
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemoryProductCatalog {
    products: Arc<Mutex<BTreeMap<i64, Product>>>,
}

impl InMemoryProductCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product) {
        self.products
            .lock()
            .expect("catalog lock poisoned")
            .insert(product.product_id.value(), product);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> Result<Page<Product>, StoreError> {
        let products = self.products.lock().expect("catalog lock poisoned");
        let mut matches: Vec<Product> = products
            .values()
            .filter(|product| matches_search(&product.name, request.search.as_ref()))
            .cloned()
            .collect();
        drop(products);

        let total = matches.len() as u64;

        matches.sort_by(|left, right| {
            let primary = match request.sort_field {
                ProductSortField::ProductId => left.product_id.cmp(&right.product_id),
                ProductSortField::Name => left.name.cmp(&right.name),
                ProductSortField::Value => left.value.cmp(&right.value),
                ProductSortField::Weight => left.weight.cmp(&right.weight),
            };
            let primary = match request.sort_order {
                SortOrder::Ascending => primary,
                SortOrder::Descending => primary.reverse(),
            };
            primary.then_with(|| left.product_id.cmp(&right.product_id))
        });

        let items = matches
            .into_iter()
            .skip(request.pagination.offset() as usize)
            .take(request.pagination.limit() as usize)
            .collect();

        Ok(Page::new(items, total, request.pagination))
    }

    async fn find_product(&self, product_id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self
            .products
            .lock()
            .expect("catalog lock poisoned")
            .get(&product_id.value())
            .cloned())
    }
}

fn matches_search(name: &str, search: Option<&SearchFilter>) -> bool {
    match search {
        None => true,
        Some(filter) => {
            let name = name.to_lowercase();
            let term = filter.term.to_lowercase();
            match filter.match_kind {
                SearchMatch::Prefix => name.starts_with(&term),
                SearchMatch::Partial => name.contains(&term),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
