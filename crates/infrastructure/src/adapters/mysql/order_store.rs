//! MySQL implementation of the order ports.
//!
//! [`MySqlOrderStore`] implements both the transactional
//! [`OrderStore`] port driving plan generation and the [`OrderLedger`]
//! read model, so cache invalidation on mutation stays local to one
//! type. The `fetch_shipping` read locks the returned rows with
//! `FOR UPDATE SKIP LOCKED`; without it two concurrent coordinators
//! could hand the same order to two robots.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use robomart_domain::delivery::ShippingOrder;
use robomart_domain::order::{NewOrder, OrderId, OrderStatus, UserId};
use robomart_workflow::ports::{
    OrderLedger, OrderListRequest, OrderSortField, OrderStore, OrderSummary, Page, SearchFilter,
    SearchMatch, StoreError,
};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, QueryBuilder, Row};

use super::MySqlPool;
use crate::adapters::memory::MemoryCache;
use crate::errors::map_sqlx_error;

// Counts change on every order mutation; keep them only briefly.
const COUNT_CACHE_TTL: Duration = Duration::from_secs(5);

// =============================================================================
// MySqlOrderStore
// =============================================================================

/// MySQL-backed order store and order history read model.
#[derive(Clone)]
pub struct MySqlOrderStore {
    pool: MySqlPool,
    count_cache: Arc<MemoryCache<u64>>,
}

impl MySqlOrderStore {
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            count_cache: Arc::new(MemoryCache::new()),
        }
    }

    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn invalidate_counts(&self) {
        self.count_cache.clear();
    }
}

// =============================================================================
// OrderStore Implementation
// =============================================================================

#[async_trait]
impl OrderStore for MySqlOrderStore {
    type Tx = sqlx::Transaction<'static, MySql>;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        self.pool
            .as_inner()
            .begin()
            .await
            .map_err(|error| map_sqlx_error("begin", error))
    }

    async fn fetch_shipping(&self, tx: &mut Self::Tx) -> Result<Vec<ShippingOrder>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT o.order_id, p.weight, p.value
            FROM orders o
            JOIN products p ON o.product_id = p.product_id
            WHERE o.shipped_status = 'shipping'
            ORDER BY o.order_id
            FOR UPDATE SKIP LOCKED
            "#,
        )
        .fetch_all(&mut **tx)
        .await
        .map_err(|error| map_sqlx_error("fetch_shipping", error))?;

        rows.iter().map(shipping_order_from_row).collect()
    }

    async fn update_statuses(
        &self,
        tx: &mut Self::Tx,
        order_ids: &[OrderId],
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        if order_ids.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("UPDATE orders SET shipped_status = ");
        builder.push_bind(status.as_str());
        builder.push(" WHERE order_id IN (");
        let mut ids = builder.separated(", ");
        for order_id in order_ids {
            ids.push_bind(order_id.value());
        }
        builder.push(")");

        builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(|error| map_sqlx_error("update_statuses", error))?;

        self.invalidate_counts();
        Ok(())
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), StoreError> {
        tx.commit()
            .await
            .map_err(|error| map_sqlx_error("commit", error))
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), StoreError> {
        tx.rollback()
            .await
            .map_err(|error| map_sqlx_error("rollback", error))
    }

    async fn create_batch(&self, orders: &[NewOrder]) -> Result<Vec<OrderId>, StoreError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("INSERT INTO orders (user_id, product_id, shipped_status, created_at) ");
        builder.push_values(orders.iter(), |mut row, order| {
            row.push_bind(order.user_id.value());
            row.push_bind(order.product_id.value());
            row.push("'shipping'");
            row.push("NOW()");
        });

        let result = builder
            .build()
            .execute(self.pool.as_inner())
            .await
            .map_err(|error| map_sqlx_error("create_batch", error))?;

        // Multi-row inserts report the first id of the generated block;
        // the block is contiguous under the default auto-increment lock
        // mode.
        let first_id = result.last_insert_id() as i64;
        let row_count = result.rows_affected() as i64;

        let order_ids = (first_id..first_id + row_count)
            .map(|id| {
                OrderId::new(id)
                    .map_err(|error| StoreError::storage("create_batch", error.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.invalidate_counts();
        Ok(order_ids)
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let mut tx = self.begin().await?;

        let exists = sqlx::query("SELECT order_id FROM orders WHERE order_id = ? FOR UPDATE")
            .bind(order_id.value())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|error| map_sqlx_error("update_status", error))?;

        if exists.is_none() {
            let _ = tx.rollback().await;
            return Err(StoreError::not_found("Order", order_id.to_string()));
        }

        sqlx::query("UPDATE orders SET shipped_status = ? WHERE order_id = ?")
            .bind(status.as_str())
            .bind(order_id.value())
            .execute(&mut *tx)
            .await
            .map_err(|error| map_sqlx_error("update_status", error))?;

        tx.commit()
            .await
            .map_err(|error| map_sqlx_error("update_status", error))?;

        self.invalidate_counts();
        Ok(())
    }
}

// =============================================================================
// OrderLedger Implementation
// =============================================================================

#[async_trait]
impl OrderLedger for MySqlOrderStore {
    async fn list_orders(
        &self,
        user_id: UserId,
        request: &OrderListRequest,
    ) -> Result<Page<OrderSummary>, StoreError> {
        let cache_key = count_cache_key(user_id, request.search.as_ref());
        let total = match self.count_cache.get(&cache_key) {
            Some(total) => total,
            None => {
                let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
                    "SELECT COUNT(*) FROM orders o \
                     JOIN products p ON o.product_id = p.product_id \
                     WHERE o.user_id = ",
                );
                builder.push_bind(user_id.value());
                push_search_filter(&mut builder, request.search.as_ref());

                let row = builder
                    .build()
                    .fetch_one(self.pool.as_inner())
                    .await
                    .map_err(|error| map_sqlx_error("list_orders", error))?;
                let total: i64 = row
                    .try_get(0)
                    .map_err(|error| map_sqlx_error("list_orders", error))?;
                let total = total as u64;

                self.count_cache.set(cache_key, total, COUNT_CACHE_TTL);
                total
            }
        };

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT o.order_id, o.product_id, p.name AS product_name, \
             o.shipped_status, o.created_at, o.arrived_at \
             FROM orders o \
             JOIN products p ON o.product_id = p.product_id \
             WHERE o.user_id = ",
        );
        builder.push_bind(user_id.value());
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
            .map_err(|error| map_sqlx_error("list_orders", error))?;

        let items = rows
            .iter()
            .map(order_summary_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total, request.pagination))
    }
}

// =============================================================================
// Query Helpers
// =============================================================================

fn push_search_filter(builder: &mut QueryBuilder<MySql>, search: Option<&SearchFilter>) {
    if let Some(filter) = search {
        builder.push(" AND p.name LIKE ");
        let pattern = match filter.match_kind {
            SearchMatch::Prefix => format!("{}%", filter.term),
            SearchMatch::Partial => format!("%{}%", filter.term),
        };
        builder.push_bind(pattern);
    }
}

/// Sort clauses mirror the covering indexes; `order_id` is always the
/// final tiebreaker so pages are stable.
fn order_by_clause(field: OrderSortField, direction: &str) -> String {
    match field {
        OrderSortField::OrderId => format!(" ORDER BY o.order_id {}", direction),
        OrderSortField::ProductName => {
            format!(" ORDER BY p.name {}, o.order_id ASC", direction)
        }
        OrderSortField::CreatedAt => {
            format!(" ORDER BY o.created_at {}, o.order_id ASC", direction)
        }
        OrderSortField::ShippedStatus => format!(
            " ORDER BY o.shipped_status {}, o.created_at DESC, o.order_id ASC",
            direction
        ),
        OrderSortField::ArrivedAt => {
            format!(" ORDER BY o.arrived_at {}, o.order_id ASC", direction)
        }
    }
}

fn shipping_order_from_row(row: &MySqlRow) -> Result<ShippingOrder, StoreError> {
    let order_id: i64 = row
        .try_get("order_id")
        .map_err(|error| map_sqlx_error("fetch_shipping", error))?;
    let weight: i64 = row
        .try_get("weight")
        .map_err(|error| map_sqlx_error("fetch_shipping", error))?;
    let value: i64 = row
        .try_get("value")
        .map_err(|error| map_sqlx_error("fetch_shipping", error))?;

    let order_id = OrderId::new(order_id)
        .map_err(|error| StoreError::storage("fetch_shipping", error.to_string()))?;
    ShippingOrder::new(order_id, weight, value)
        .map_err(|error| StoreError::storage("fetch_shipping", error.to_string()))
}

fn order_summary_from_row(row: &MySqlRow) -> Result<OrderSummary, StoreError> {
    let operation = "list_orders";

    let order_id: i64 = row
        .try_get("order_id")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let product_id: i64 = row
        .try_get("product_id")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let product_name: String = row
        .try_get("product_name")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let shipped_status: String = row
        .try_get("shipped_status")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|error| map_sqlx_error(operation, error))?;
    let arrived_at: Option<DateTime<Utc>> = row
        .try_get("arrived_at")
        .map_err(|error| map_sqlx_error(operation, error))?;

    Ok(OrderSummary {
        order_id: OrderId::new(order_id)
            .map_err(|error| StoreError::storage(operation, error.to_string()))?,
        product_id: robomart_domain::product::ProductId::new(product_id)
            .map_err(|error| StoreError::storage(operation, error.to_string()))?,
        product_name,
        shipped_status: shipped_status
            .parse()
            .map_err(|error: robomart_domain::common::ValidationError| {
                StoreError::storage(operation, error.to_string())
            })?,
        created_at,
        arrived_at,
    })
}

fn count_cache_key(user_id: UserId, search: Option<&SearchFilter>) -> String {
    match search {
        None => format!("order_count:user:{}:all", user_id),
        Some(filter) => {
            let kind = match filter.match_kind {
                SearchMatch::Prefix => "prefix",
                SearchMatch::Partial => "partial",
            };
            format!("order_count:user:{}:{}:{}", user_id, kind, filter.term)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
