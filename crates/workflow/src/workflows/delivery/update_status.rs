//! Robot completion reports: a single-order status update in its own
//! transaction. Does not interact with the plan selector.

use super::UpdateStatusCommand;
use crate::errors::WorkflowError;
use crate::ports::OrderStore;

/// Applies one robot-reported status change.
///
/// # Errors
///
/// - [`WorkflowError::NotFound`] when the order does not exist.
/// - [`WorkflowError::Storage`] on storage failure.
pub async fn update_order_status<S: OrderStore>(
    store: &S,
    command: UpdateStatusCommand,
) -> Result<(), WorkflowError> {
    store
        .update_status(command.order_id(), command.status())
        .await?;

    tracing::info!(
        order_id = %command.order_id(),
        status = %command.status(),
        "order status updated"
    );

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use robomart_domain::delivery::ShippingOrder;
    use robomart_domain::order::{NewOrder, OrderId, OrderStatus};
    use rstest::rstest;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::ports::StoreError;

    #[derive(Clone, Default)]
    struct MockStatusStore {
        statuses: Arc<Mutex<HashMap<i64, OrderStatus>>>,
    }

    impl MockStatusStore {
        fn with_order(order_id: i64, status: OrderStatus) -> Self {
            let store = Self::default();
            store.statuses.lock().unwrap().insert(order_id, status);
            store
        }
    }

    #[async_trait]
    impl OrderStore for MockStatusStore {
        type Tx = ();

        async fn begin(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn fetch_shipping(&self, _tx: &mut ()) -> Result<Vec<ShippingOrder>, StoreError> {
            Ok(Vec::new())
        }

        async fn update_statuses(
            &self,
            _tx: &mut (),
            _order_ids: &[OrderId],
            _status: OrderStatus,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn commit(&self, _tx: ()) -> Result<(), StoreError> {
            Ok(())
        }

        async fn rollback(&self, _tx: ()) -> Result<(), StoreError> {
            Ok(())
        }

        async fn create_batch(&self, _orders: &[NewOrder]) -> Result<Vec<OrderId>, StoreError> {
            Ok(Vec::new())
        }

        async fn update_status(
            &self,
            order_id: OrderId,
            status: OrderStatus,
        ) -> Result<(), StoreError> {
            let mut statuses = self.statuses.lock().unwrap();
            match statuses.get_mut(&order_id.value()) {
                Some(entry) => {
                    *entry = status;
                    Ok(())
                }
                None => Err(StoreError::not_found("Order", order_id.to_string())),
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn updates_the_order_status() {
        let store = MockStatusStore::with_order(7, OrderStatus::Delivering);
        let command = UpdateStatusCommand::new(7, "delivered").unwrap();

        update_order_status(&store, command).await.unwrap();

        assert_eq!(
            store.statuses.lock().unwrap()[&7],
            OrderStatus::Delivered
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_order_reports_not_found() {
        let store = MockStatusStore::default();
        let command = UpdateStatusCommand::new(7, "delivered").unwrap();

        let error = update_order_status(&store, command).await.unwrap_err();

        assert!(error.is_not_found());
    }
}
