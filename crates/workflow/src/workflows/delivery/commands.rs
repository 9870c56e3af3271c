use robomart_domain::delivery::RobotId;
use robomart_domain::order::{OrderId, OrderStatus};

use crate::errors::WorkflowError;

// =============================================================================
// GeneratePlanCommand
// =============================================================================

/// Validated input of the plan generation workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratePlanCommand {
    robot_id: RobotId,
    capacity: i64,
}

impl GeneratePlanCommand {
    /// Validates the raw request values.
    ///
    /// A zero capacity is allowed and produces an empty plan; a negative
    /// capacity is rejected.
    pub fn new(robot_id: impl Into<String>, capacity: i64) -> Result<Self, WorkflowError> {
        let robot_id = RobotId::new(robot_id)?;
        if capacity < 0 {
            return Err(WorkflowError::invalid_argument(format!(
                "capacity must be non-negative, got {}",
                capacity
            )));
        }
        Ok(Self { robot_id, capacity })
    }

    #[must_use]
    pub fn robot_id(&self) -> &RobotId {
        &self.robot_id
    }

    #[must_use]
    pub const fn capacity(&self) -> i64 {
        self.capacity
    }
}

// =============================================================================
// UpdateStatusCommand
// =============================================================================

/// Validated input of the status update workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusCommand {
    order_id: OrderId,
    status: OrderStatus,
}

impl UpdateStatusCommand {
    pub fn new(order_id: i64, status: &str) -> Result<Self, WorkflowError> {
        let order_id = OrderId::new(order_id)?;
        let status: OrderStatus = status.parse()?;
        Ok(Self { order_id, status })
    }

    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }
}

// =============================================================================
// Tests
// =============================================================================
