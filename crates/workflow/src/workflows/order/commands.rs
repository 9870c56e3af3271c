use robomart_domain::order::{NewOrder, UserId};
use robomart_domain::product::ProductId;

use crate::errors::WorkflowError;

// =============================================================================
// OrderLine
// =============================================================================

/// One requested product and how many units of it to order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    product_id: ProductId,
    quantity: u32,
}

impl OrderLine {
    pub fn new(product_id: i64, quantity: u32) -> Result<Self, WorkflowError> {
        let product_id = ProductId::new(product_id)?;
        if quantity == 0 {
            return Err(WorkflowError::invalid_argument(
                "quantity must be at least 1",
            ));
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

// =============================================================================
// PlaceOrdersCommand
// =============================================================================

/// Validated input of the order placement workflow.
///
/// Each line expands into `quantity` individual orders, all created in
/// the `shipping` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrdersCommand {
    user_id: UserId,
    lines: Vec<OrderLine>,
}

impl PlaceOrdersCommand {
    pub fn new(user_id: UserId, lines: Vec<OrderLine>) -> Result<Self, WorkflowError> {
        if lines.is_empty() {
            return Err(WorkflowError::invalid_argument(
                "at least one order line is required",
            ));
        }
        Ok(Self { user_id, lines })
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Expands the lines into one row per ordered unit, preserving line
    /// order.
    #[must_use]
    pub fn expand(&self) -> Vec<NewOrder> {
        let user_id = self.user_id;
        self.lines
            .iter()
            .flat_map(|line| {
                let row = NewOrder::new(user_id, line.product_id());
                (0..line.quantity()).map(move |_| row)
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
