use crate::common::ValidationError;
use crate::order::OrderId;

use super::RobotId;

// =============================================================================
// ShippingOrder
// =============================================================================

/// The row shape the selector consumes: an order awaiting pickup joined
/// with the weight and value of its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingOrder {
    order_id: OrderId,
    weight: i64,
    value: i64,
}

impl ShippingOrder {
    pub fn new(order_id: OrderId, weight: i64, value: i64) -> Result<Self, ValidationError> {
        if weight < 0 {
            return Err(ValidationError::out_of_range("weight", 0, i64::MAX, weight));
        }
        if value < 0 {
            return Err(ValidationError::out_of_range("value", 0, i64::MAX, value));
        }
        Ok(Self {
            order_id,
            weight,
            value,
        })
    }

    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    #[must_use]
    pub const fn weight(&self) -> i64 {
        self.weight
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

// =============================================================================
// DeliveryPlan
// =============================================================================

/// The immutable result of one selector run.
///
/// Invariants: `total_weight` and `total_value` are the sums over the
/// selected orders, and the orders appear in the same relative order as
/// in the selector input (which is the fetch order from storage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPlan {
    robot_id: RobotId,
    total_weight: i64,
    total_value: i64,
    orders: Vec<ShippingOrder>,
}

impl DeliveryPlan {
    /// Assembles a plan from the selected orders, computing the totals.
    #[must_use]
    pub fn assemble(robot_id: RobotId, orders: Vec<ShippingOrder>) -> Self {
        let total_weight = orders.iter().map(ShippingOrder::weight).sum();
        let total_value = orders.iter().map(ShippingOrder::value).sum();
        Self {
            robot_id,
            total_weight,
            total_value,
            orders,
        }
    }

    /// A plan carrying no orders.
    #[must_use]
    pub fn empty(robot_id: RobotId) -> Self {
        Self::assemble(robot_id, Vec::new())
    }

    #[must_use]
    pub fn robot_id(&self) -> &RobotId {
        &self.robot_id
    }

    #[must_use]
    pub const fn total_weight(&self) -> i64 {
        self.total_weight
    }

    #[must_use]
    pub const fn total_value(&self) -> i64 {
        self.total_value
    }

    #[must_use]
    pub fn orders(&self) -> &[ShippingOrder] {
        &self.orders
    }

    #[must_use]
    pub fn order_ids(&self) -> Vec<OrderId> {
        self.orders.iter().map(ShippingOrder::order_id).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn shipping_order(id: i64, weight: i64, value: i64) -> ShippingOrder {
        ShippingOrder::new(OrderId::new(id).unwrap(), weight, value).unwrap()
    }

    fn robot() -> RobotId {
        RobotId::new("robot-1").unwrap()
    }

    mod shipping_order_type {
        use super::*;

        #[rstest]
        fn new_accepts_non_negative_weight_and_value() {
            let order = shipping_order(1, 0, 0);
            assert_eq!(order.weight(), 0);
            assert_eq!(order.value(), 0);
        }

        #[rstest]
        fn new_rejects_negative_weight() {
            let id = OrderId::new(1).unwrap();
            assert!(ShippingOrder::new(id, -1, 0).is_err());
        }

        #[rstest]
        fn new_rejects_negative_value() {
            let id = OrderId::new(1).unwrap();
            assert!(ShippingOrder::new(id, 0, -1).is_err());
        }
    }

    mod delivery_plan {
        use super::*;

        #[rstest]
        fn assemble_computes_totals() {
            let plan = DeliveryPlan::assemble(
                robot(),
                vec![shipping_order(1, 10, 3), shipping_order(2, 20, 4)],
            );

            assert_eq!(plan.total_weight(), 30);
            assert_eq!(plan.total_value(), 7);
            assert_eq!(plan.orders().len(), 2);
        }

        #[rstest]
        fn empty_plan_has_zero_totals() {
            let plan = DeliveryPlan::empty(robot());

            assert!(plan.is_empty());
            assert_eq!(plan.total_weight(), 0);
            assert_eq!(plan.total_value(), 0);
        }

        #[rstest]
        fn order_ids_preserve_order() {
            let plan = DeliveryPlan::assemble(
                robot(),
                vec![shipping_order(5, 1, 1), shipping_order(3, 1, 1)],
            );

            let ids: Vec<i64> = plan.order_ids().iter().map(OrderId::value).collect();
            assert_eq!(ids, vec![5, 3]);
        }
    }
}
