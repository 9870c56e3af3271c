//! In-memory implementation of the order ports.
//!
//! Serialises transactions behind a single async gate, which gives the
//! same observable guarantee as the database's locking read: concurrent
//! plan coordinators always claim disjoint order sets. Backs the
//! integration tests and database-free local runs.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use robomart_domain::delivery::ShippingOrder;
use robomart_domain::order::{NewOrder, OrderId, OrderStatus, UserId};
use robomart_domain::product::Product;
use robomart_workflow::ports::{
    OrderLedger, OrderListRequest, OrderSortField, OrderStore, OrderSummary, Page, SearchFilter,
    SearchMatch, SortOrder, StoreError,
};
use tokio::sync::OwnedMutexGuard;

// =============================================================================
// Storage Shapes
// =============================================================================

#[derive(Debug, Clone)]
struct StoredOrder {
    user_id: i64,
    product_id: i64,
    product_name: String,
    weight: i64,
    value: i64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    arrived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct RegisteredProduct {
    name: String,
    weight: i64,
    value: i64,
}

struct Inner {
    gate: Arc<tokio::sync::Mutex<()>>,
    rows: Mutex<BTreeMap<i64, StoredOrder>>,
    products: Mutex<HashMap<i64, RegisteredProduct>>,
    next_order_id: AtomicI64,
}

// =============================================================================
// InMemoryOrderStore
// =============================================================================

/// Database-free order store and ledger.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    inner: Arc<Inner>,
}

/// Transaction handle: holds the store gate and the staged writes.
/// Dropping it without commit discards the writes.
pub struct InMemoryTx {
    _guard: OwnedMutexGuard<()>,
    staged: Vec<(Vec<OrderId>, OrderStatus)>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                gate: Arc::new(tokio::sync::Mutex::new(())),
                rows: Mutex::new(BTreeMap::new()),
                products: Mutex::new(HashMap::new()),
                next_order_id: AtomicI64::new(1),
            }),
        }
    }

    /// Makes a product orderable through `create_batch`.
    pub fn register_product(&self, product: &Product) {
        self.inner.products.lock().expect("store lock poisoned").insert(
            product.product_id.value(),
            RegisteredProduct {
                name: product.name.clone(),
                weight: product.weight,
                value: product.value,
            },
        );
    }

    /// Directly seeds `shipping` orders with the given weights and
    /// values, returning their identifiers.
    pub fn seed_shipping(&self, specs: &[(i64, i64)]) -> Vec<OrderId> {
        let mut rows = self.inner.rows.lock().expect("store lock poisoned");
        specs
            .iter()
            .map(|&(weight, value)| {
                let id = self.inner.next_order_id.fetch_add(1, Ordering::SeqCst);
                rows.insert(
                    id,
                    StoredOrder {
                        user_id: 1,
                        product_id: id,
                        product_name: format!("product-{}", id),
                        weight,
                        value,
                        status: OrderStatus::Shipping,
                        created_at: Utc::now(),
                        arrived_at: None,
                    },
                );
                OrderId::new(id).expect("seeded ids are positive")
            })
            .collect()
    }

    /// Current status of one order, if it exists.
    #[must_use]
    pub fn status_of(&self, order_id: OrderId) -> Option<OrderStatus> {
        self.inner
            .rows
            .lock()
            .expect("store lock poisoned")
            .get(&order_id.value())
            .map(|row| row.status)
    }

    /// All order statuses, ordered by id.
    #[must_use]
    pub fn statuses(&self) -> Vec<(OrderId, OrderStatus)> {
        self.inner
            .rows
            .lock()
            .expect("store lock poisoned")
            .iter()
            .map(|(&id, row)| (OrderId::new(id).expect("stored ids are positive"), row.status))
            .collect()
    }
}

// =============================================================================
// OrderStore Implementation
// =============================================================================

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<InMemoryTx, StoreError> {
        Ok(InMemoryTx {
            _guard: self.inner.gate.clone().lock_owned().await,
            staged: Vec::new(),
        })
    }

    async fn fetch_shipping(&self, _tx: &mut InMemoryTx) -> Result<Vec<ShippingOrder>, StoreError> {
        let rows = self.inner.rows.lock().expect("store lock poisoned");
        rows.iter()
            .filter(|(_, row)| row.status == OrderStatus::Shipping)
            .map(|(&id, row)| {
                let order_id = OrderId::new(id)
                    .map_err(|error| StoreError::storage("fetch_shipping", error.to_string()))?;
                ShippingOrder::new(order_id, row.weight, row.value)
                    .map_err(|error| StoreError::storage("fetch_shipping", error.to_string()))
            })
            .collect()
    }

    async fn update_statuses(
        &self,
        tx: &mut InMemoryTx,
        order_ids: &[OrderId],
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        tx.staged.push((order_ids.to_vec(), status));
        Ok(())
    }

    async fn commit(&self, tx: InMemoryTx) -> Result<(), StoreError> {
        let mut rows = self.inner.rows.lock().expect("store lock poisoned");
        for (order_ids, status) in tx.staged {
            for order_id in order_ids {
                if let Some(row) = rows.get_mut(&order_id.value()) {
                    row.status = status;
                }
            }
        }
        Ok(())
    }

    async fn rollback(&self, _tx: InMemoryTx) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_batch(&self, orders: &[NewOrder]) -> Result<Vec<OrderId>, StoreError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let _guard = self.inner.gate.lock().await;

        let products = self.inner.products.lock().expect("store lock poisoned");
        let mut rows = self.inner.rows.lock().expect("store lock poisoned");

        let mut order_ids = Vec::with_capacity(orders.len());
        for order in orders {
            let product = products.get(&order.product_id.value()).ok_or_else(|| {
                StoreError::not_found("Product", order.product_id.to_string())
            })?;
            let id = self.inner.next_order_id.fetch_add(1, Ordering::SeqCst);
            rows.insert(
                id,
                StoredOrder {
                    user_id: order.user_id.value(),
                    product_id: order.product_id.value(),
                    product_name: product.name.clone(),
                    weight: product.weight,
                    value: product.value,
                    status: OrderStatus::Shipping,
                    created_at: Utc::now(),
                    arrived_at: None,
                },
            );
            order_ids.push(
                OrderId::new(id)
                    .map_err(|error| StoreError::storage("create_batch", error.to_string()))?,
            );
        }
        Ok(order_ids)
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let _guard = self.inner.gate.lock().await;
        let mut rows = self.inner.rows.lock().expect("store lock poisoned");
        match rows.get_mut(&order_id.value()) {
            Some(row) => {
                row.status = status;
                Ok(())
            }
            None => Err(StoreError::not_found("Order", order_id.to_string())),
        }
    }
}

// =============================================================================
// OrderLedger Implementation
// =============================================================================

#[async_trait]
impl OrderLedger for InMemoryOrderStore {
    async fn list_orders(
        &self,
        user_id: UserId,
        request: &OrderListRequest,
    ) -> Result<Page<OrderSummary>, StoreError> {
        let rows = self.inner.rows.lock().expect("store lock poisoned");
        let mut matches: Vec<(i64, StoredOrder)> = rows
            .iter()
            .filter(|(_, row)| row.user_id == user_id.value())
            .filter(|(_, row)| matches_search(&row.product_name, request.search.as_ref()))
            .map(|(&id, row)| (id, row.clone()))
            .collect();
        drop(rows);

        let total = matches.len() as u64;

        matches.sort_by(|left, right| {
            compare_rows(left, right, request.sort_field, request.sort_order)
        });

        let offset = request.pagination.offset() as usize;
        let limit = request.pagination.limit() as usize;
        let items = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(id, row)| {
                Ok(OrderSummary {
                    order_id: OrderId::new(id)
                        .map_err(|error| StoreError::storage("list_orders", error.to_string()))?,
                    product_id: robomart_domain::product::ProductId::new(row.product_id)
                        .map_err(|error| StoreError::storage("list_orders", error.to_string()))?,
                    product_name: row.product_name,
                    shipped_status: row.status,
                    created_at: row.created_at,
                    arrived_at: row.arrived_at,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(Page::new(items, total, request.pagination))
    }
}

// =============================================================================
// Listing Helpers
// =============================================================================

fn matches_search(product_name: &str, search: Option<&SearchFilter>) -> bool {
    match search {
        None => true,
        Some(filter) => {
            let name = product_name.to_lowercase();
            let term = filter.term.to_lowercase();
            match filter.match_kind {
                SearchMatch::Prefix => name.starts_with(&term),
                SearchMatch::Partial => name.contains(&term),
            }
        }
    }
}

fn directed(ordering: CmpOrdering, direction: SortOrder) -> CmpOrdering {
    match direction {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

// Mirrors the SQL clauses: the requested field first, then the fixed
// ascending order-id tiebreak (shipped-status additionally breaks ties
// by recency).
fn compare_rows(
    left: &(i64, StoredOrder),
    right: &(i64, StoredOrder),
    field: OrderSortField,
    direction: SortOrder,
) -> CmpOrdering {
    let (left_id, left_row) = left;
    let (right_id, right_row) = right;

    let primary = match field {
        OrderSortField::OrderId => return directed(left_id.cmp(right_id), direction),
        OrderSortField::ProductName => left_row.product_name.cmp(&right_row.product_name),
        OrderSortField::CreatedAt => left_row.created_at.cmp(&right_row.created_at),
        OrderSortField::ShippedStatus => {
            left_row.status.as_str().cmp(right_row.status.as_str())
        }
        OrderSortField::ArrivedAt => left_row.arrived_at.cmp(&right_row.arrived_at),
    };

    let primary = directed(primary, direction);
    if primary != CmpOrdering::Equal {
        return primary;
    }

    if field == OrderSortField::ShippedStatus {
        let recency = right_row.created_at.cmp(&left_row.created_at);
        if recency != CmpOrdering::Equal {
            return recency;
        }
    }

    left_id.cmp(right_id)
}

// =============================================================================
// Tests
// =============================================================================
