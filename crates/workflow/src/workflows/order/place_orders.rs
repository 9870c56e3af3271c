use robomart_domain::order::OrderId;

use super::PlaceOrdersCommand;
use crate::errors::WorkflowError;
use crate::ports::OrderStore;

/// Creates the requested orders in one batched insert and returns the
/// generated identifiers in input order.
///
/// # Errors
///
/// Returns [`WorkflowError::Storage`] when the insert fails.
pub async fn place_orders<S: OrderStore>(
    store: &S,
    command: PlaceOrdersCommand,
) -> Result<Vec<OrderId>, WorkflowError> {
    let rows = command.expand();
    let order_ids = store.create_batch(&rows).await?;

    tracing::info!(
        user_id = %command.user_id(),
        orders = order_ids.len(),
        "orders created"
    );

    Ok(order_ids)
}

// =============================================================================
// Tests
// =============================================================================
