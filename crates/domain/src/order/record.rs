use chrono::{DateTime, Utc};

use super::{OrderId, OrderStatus, UserId};
use crate::product::ProductId;

// =============================================================================
// Order
// =============================================================================

/// A persisted order row.
///
/// Weight and value are frozen at creation time (they are copied from
/// the ordered product) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub shipped_status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub arrived_at: Option<DateTime<Utc>>,
}

// =============================================================================
// NewOrder
// =============================================================================

/// An order awaiting insertion.
///
/// The storage layer assigns the identifier and sets the status to
/// [`OrderStatus::Shipping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
}

impl NewOrder {
    #[must_use]
    pub const fn new(user_id: UserId, product_id: ProductId) -> Self {
        Self {
            user_id,
            product_id,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_order_carries_user_and_product() {
        let user = UserId::new(1).unwrap();
        let product = ProductId::new(2).unwrap();
        let order = NewOrder::new(user, product);

        assert_eq!(order.user_id, user);
        assert_eq!(order.product_id, product);
    }
}
