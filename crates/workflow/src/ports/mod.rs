//! Abstract port definitions for the workflow layer.
//!
//! Concrete adapters live in the infrastructure crate. The central port
//! is [`OrderStore`]: a transactional view of the orders table whose
//! `fetch_shipping` read must lock the returned rows so that two
//! concurrent plan coordinators can never claim the same order.

use async_trait::async_trait;
use robomart_domain::delivery::ShippingOrder;
use robomart_domain::order::{NewOrder, OrderId, OrderStatus, UserId};
use robomart_domain::product::{Product, ProductId};

mod listing;

pub use listing::{
    OrderListRequest, OrderSortField, OrderSummary, Page, Pagination, ProductListRequest,
    ProductSortField, SearchFilter, SearchMatch, SortOrder,
};

use std::error::Error;
use std::fmt;

// =============================================================================
// StoreError
// =============================================================================

/// Failure reported by a storage adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// I/O, connection or query failure.
    Storage {
        operation: String,
        message: String,
    },
    /// The isolation layer aborted the transaction; the whole request
    /// may be retried.
    Conflict {
        operation: String,
        message: String,
    },
    /// The addressed row does not exist.
    NotFound {
        entity_type: String,
        identifier: String,
    },
}

impl StoreError {
    #[must_use]
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            operation: operation.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage { operation, message } => {
                write!(formatter, "storage {} failed: {}", operation, message)
            }
            Self::Conflict { operation, message } => {
                write!(formatter, "transaction conflict in {}: {}", operation, message)
            }
            Self::NotFound {
                entity_type,
                identifier,
            } => {
                write!(
                    formatter,
                    "{} with identifier '{}' not found",
                    entity_type, identifier
                )
            }
        }
    }
}

impl Error for StoreError {}

// =============================================================================
// OrderStore
// =============================================================================

/// Transactional access to the orders table.
///
/// The plan coordinator drives one transaction across `begin`,
/// `fetch_shipping`, `update_statuses` and `commit`; dropping an
/// uncommitted `Tx` must roll it back.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Transaction handle. Dropping it without `commit` rolls back.
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, StoreError>;

    /// Reads all `shipping` orders, each joined with its product's
    /// weight and value, ordered by order id. The read locks the rows
    /// (skip-locked semantics) so concurrent coordinators see disjoint
    /// sets.
    async fn fetch_shipping(&self, tx: &mut Self::Tx) -> Result<Vec<ShippingOrder>, StoreError>;

    /// Sets the status of every listed order; all rows or none.
    async fn update_statuses(
        &self,
        tx: &mut Self::Tx,
        order_ids: &[OrderId],
        status: OrderStatus,
    ) -> Result<(), StoreError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), StoreError>;

    async fn rollback(&self, tx: Self::Tx) -> Result<(), StoreError>;

    /// Inserts the batch in one statement and returns the generated
    /// identifiers in input order.
    async fn create_batch(&self, orders: &[NewOrder]) -> Result<Vec<OrderId>, StoreError>;

    /// Sets one order's status in its own transaction (robot completion
    /// reports). Fails with `NotFound` when the order does not exist.
    async fn update_status(&self, order_id: OrderId, status: OrderStatus)
        -> Result<(), StoreError>;
}

// =============================================================================
// OrderLedger
// =============================================================================

/// Read model over a user's order history.
#[async_trait]
pub trait OrderLedger: Send + Sync + 'static {
    async fn list_orders(
        &self,
        user_id: UserId,
        request: &OrderListRequest,
    ) -> Result<Page<OrderSummary>, StoreError>;
}

// =============================================================================
// ProductCatalog
// =============================================================================

/// Read model over the product catalogue.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    async fn list_products(
        &self,
        request: &ProductListRequest,
    ) -> Result<Page<Product>, StoreError>;

    async fn find_product(&self, product_id: ProductId) -> Result<Option<Product>, StoreError>;
}

// =============================================================================
// UserDirectory
// =============================================================================

/// A registered user as stored, with their password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: UserId,
    pub user_name: String,
    pub password_hash: String,
}

/// Lookup of users for the authentication layer.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<UserRecord>, StoreError>;
}

// =============================================================================
// Tests
// =============================================================================
