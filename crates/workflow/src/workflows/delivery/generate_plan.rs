//! The plan coordinator: drives one robot's delivery-plan request
//! end-to-end inside a storage transaction.
//!
//! The whole request runs under a deadline. The selector is CPU-bound
//! and executes on the blocking pool with a cancellation token that
//! fires when the request is abandoned; the transaction commits only
//! after the chosen orders were atomically marked `delivering`.

use std::time::Duration;

use robomart_domain::delivery::{select_orders, DeliveryPlan};
use robomart_domain::order::OrderStatus;
use tokio_util::sync::CancellationToken;

use super::GeneratePlanCommand;
use crate::errors::WorkflowError;
use crate::ports::OrderStore;

// =============================================================================
// PlanPolicy
// =============================================================================

/// Deadline and retry budget of one plan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanPolicy {
    /// Wall-clock budget for the whole request.
    pub deadline: Duration,
    /// How many times the transaction is attempted when the isolation
    /// layer reports a conflict.
    pub max_attempts: u32,
}

impl PlanPolicy {
    #[must_use]
    pub const fn new(deadline: Duration, max_attempts: u32) -> Self {
        Self {
            deadline,
            max_attempts,
        }
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(5),
            max_attempts: 3,
        }
    }
}

// =============================================================================
// generate_delivery_plan
// =============================================================================

/// Computes and claims a delivery plan for one robot.
///
/// Opens a transaction, reads the pending `shipping` orders under row
/// locks, selects the value-maximal subset within the robot's capacity
/// and marks it `delivering` before committing. Transaction conflicts
/// are retried up to the policy's budget; an exhausted budget surfaces
/// as a storage error.
///
/// # Errors
///
/// - [`WorkflowError::Timeout`] when the deadline elapses; no order
///   changes state.
/// - [`WorkflowError::Storage`] on storage failure or exhausted retries.
pub async fn generate_delivery_plan<S: OrderStore>(
    store: &S,
    command: GeneratePlanCommand,
    policy: PlanPolicy,
) -> Result<DeliveryPlan, WorkflowError> {
    let cancel = CancellationToken::new();
    // Cancels the selector if the request is abandoned mid-run.
    let _guard = cancel.clone().drop_guard();

    match tokio::time::timeout(
        policy.deadline,
        attempt_with_retries(store, &command, policy, &cancel),
    )
    .await
    {
        Ok(result) => result,
        Err(_elapsed) => {
            tracing::warn!(
                robot_id = %command.robot_id(),
                "delivery plan request hit its deadline"
            );
            Err(WorkflowError::timeout("generate_delivery_plan"))
        }
    }
}

async fn attempt_with_retries<S: OrderStore>(
    store: &S,
    command: &GeneratePlanCommand,
    policy: PlanPolicy,
    cancel: &CancellationToken,
) -> Result<DeliveryPlan, WorkflowError> {
    let budget = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match attempt_plan(store, command, cancel).await {
            Err(WorkflowError::Conflict { reason }) => {
                if attempt >= budget {
                    return Err(WorkflowError::storage(
                        "generate_delivery_plan",
                        format!("transaction retries exhausted: {}", reason),
                    ));
                }
                tracing::warn!(attempt, %reason, "plan transaction conflicted, retrying");
                attempt += 1;
            }
            other => return other,
        }
    }
}

async fn attempt_plan<S: OrderStore>(
    store: &S,
    command: &GeneratePlanCommand,
    cancel: &CancellationToken,
) -> Result<DeliveryPlan, WorkflowError> {
    let mut tx = store.begin().await?;

    let orders = match store.fetch_shipping(&mut tx).await {
        Ok(orders) => orders,
        Err(error) => {
            let _ = store.rollback(tx).await;
            return Err(error.into());
        }
    };

    tracing::debug!(
        robot_id = %command.robot_id(),
        pending = orders.len(),
        capacity = command.capacity(),
        "selecting orders for delivery"
    );

    let robot_id = command.robot_id().clone();
    let capacity = command.capacity();
    let token = cancel.clone();
    let selection = tokio::task::spawn_blocking(move || {
        select_orders(&robot_id, &orders, capacity, || token.is_cancelled())
    })
    .await;

    let plan = match selection {
        Ok(Ok(plan)) => plan,
        Ok(Err(cancelled)) => {
            let _ = store.rollback(tx).await;
            tracing::debug!("selector cancelled before completion");
            return Err(WorkflowError::timeout(cancelled.to_string()));
        }
        Err(join_error) => {
            let _ = store.rollback(tx).await;
            return Err(WorkflowError::storage("select_orders", join_error.to_string()));
        }
    };

    if plan.is_empty() {
        store.commit(tx).await?;
        return Ok(plan);
    }

    if let Err(error) = store
        .update_statuses(&mut tx, &plan.order_ids(), OrderStatus::Delivering)
        .await
    {
        let _ = store.rollback(tx).await;
        return Err(error.into());
    }

    store.commit(tx).await?;

    tracing::info!(
        robot_id = %command.robot_id(),
        orders = plan.orders().len(),
        total_weight = plan.total_weight(),
        total_value = plan.total_value(),
        "delivery plan committed"
    );

    Ok(plan)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use robomart_domain::delivery::ShippingOrder;
    use robomart_domain::order::{NewOrder, OrderId};
    use rstest::rstest;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::OwnedMutexGuard;

    use crate::ports::StoreError;

    // =========================================================================
    // Mock OrderStore
    // =========================================================================

    #[derive(Debug, Clone, Copy)]
    struct MockRow {
        weight: i64,
        value: i64,
        status: OrderStatus,
    }

    #[derive(Clone, Default)]
    struct MockOrderStore {
        rows: Arc<Mutex<BTreeMap<i64, MockRow>>>,
        gate: Arc<tokio::sync::Mutex<()>>,
        commit_conflicts: Arc<AtomicU32>,
        commits: Arc<AtomicU32>,
        fetch_delay_millis: Arc<AtomicU32>,
    }

    struct MockTx {
        _guard: OwnedMutexGuard<()>,
        staged: Vec<(Vec<OrderId>, OrderStatus)>,
    }

    impl MockOrderStore {
        fn seeded(specs: &[(i64, i64)]) -> Self {
            let store = Self::default();
            {
                let mut rows = store.rows.lock().unwrap();
                for (index, &(weight, value)) in specs.iter().enumerate() {
                    rows.insert(
                        index as i64 + 1,
                        MockRow {
                            weight,
                            value,
                            status: OrderStatus::Shipping,
                        },
                    );
                }
            }
            store
        }

        fn fail_next_commits(&self, count: u32) {
            self.commit_conflicts.store(count, Ordering::SeqCst);
        }

        fn delay_fetches_by(&self, millis: u32) {
            self.fetch_delay_millis.store(millis, Ordering::SeqCst);
        }

        fn status_of(&self, order_id: i64) -> OrderStatus {
            self.rows.lock().unwrap()[&order_id].status
        }

        fn statuses(&self) -> Vec<(i64, OrderStatus)> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .map(|(&id, row)| (id, row.status))
                .collect()
        }
    }

    #[async_trait]
    impl OrderStore for MockOrderStore {
        type Tx = MockTx;

        async fn begin(&self) -> Result<MockTx, StoreError> {
            Ok(MockTx {
                _guard: self.gate.clone().lock_owned().await,
                staged: Vec::new(),
            })
        }

        async fn fetch_shipping(&self, _tx: &mut MockTx) -> Result<Vec<ShippingOrder>, StoreError> {
            let delay = self.fetch_delay_millis.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(u64::from(delay))).await;
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|(_, row)| row.status == OrderStatus::Shipping)
                .map(|(&id, row)| {
                    ShippingOrder::new(OrderId::new(id).unwrap(), row.weight, row.value).unwrap()
                })
                .collect())
        }

        async fn update_statuses(
            &self,
            tx: &mut MockTx,
            order_ids: &[OrderId],
            status: OrderStatus,
        ) -> Result<(), StoreError> {
            tx.staged.push((order_ids.to_vec(), status));
            Ok(())
        }

        async fn commit(&self, tx: MockTx) -> Result<(), StoreError> {
            let injected = self
                .commit_conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .map(|previous| previous > 0)
                .unwrap_or(false);
            if injected {
                return Err(StoreError::conflict("commit", "injected deadlock"));
            }

            let mut rows = self.rows.lock().unwrap();
            for (order_ids, status) in tx.staged {
                for order_id in order_ids {
                    if let Some(row) = rows.get_mut(&order_id.value()) {
                        row.status = status;
                    }
                }
            }
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(&self, _tx: MockTx) -> Result<(), StoreError> {
            Ok(())
        }

        async fn create_batch(&self, _orders: &[NewOrder]) -> Result<Vec<OrderId>, StoreError> {
            unimplemented!("not exercised by plan generation")
        }

        async fn update_status(
            &self,
            _order_id: OrderId,
            _status: OrderStatus,
        ) -> Result<(), StoreError> {
            unimplemented!("not exercised by plan generation")
        }
    }

    fn command(capacity: i64) -> GeneratePlanCommand {
        GeneratePlanCommand::new("robot-1", capacity).unwrap()
    }

    // =========================================================================
    // Happy Path
    // =========================================================================

    mod happy_path {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn selects_optimal_orders_and_marks_them_delivering() {
            let store = MockOrderStore::seeded(&[(2, 3), (3, 4), (4, 5), (5, 6)]);

            let plan = generate_delivery_plan(&store, command(5), PlanPolicy::default())
                .await
                .unwrap();

            assert_eq!(plan.total_weight(), 5);
            assert_eq!(plan.total_value(), 7);
            for order_id in plan.order_ids() {
                assert_eq!(store.status_of(order_id.value()), OrderStatus::Delivering);
            }
            // Unselected orders stay available for the next robot.
            assert_eq!(store.status_of(3), OrderStatus::Shipping);
            assert_eq!(store.status_of(4), OrderStatus::Shipping);
        }

        #[rstest]
        #[tokio::test]
        async fn already_delivering_orders_are_excluded() {
            let store = MockOrderStore::seeded(&[(1, 10), (1, 10)]);
            {
                let mut rows = store.rows.lock().unwrap();
                rows.get_mut(&1).unwrap().status = OrderStatus::Delivering;
            }

            let plan = generate_delivery_plan(&store, command(10), PlanPolicy::default())
                .await
                .unwrap();

            let ids: Vec<i64> = plan.order_ids().iter().map(|id| id.value()).collect();
            assert_eq!(ids, vec![2]);
        }

        #[rstest]
        #[tokio::test]
        async fn zero_capacity_commits_an_empty_plan() {
            let store = MockOrderStore::seeded(&[(2, 3), (3, 4)]);

            let plan = generate_delivery_plan(&store, command(0), PlanPolicy::default())
                .await
                .unwrap();

            assert!(plan.is_empty());
            assert_eq!(store.status_of(1), OrderStatus::Shipping);
            assert_eq!(store.status_of(2), OrderStatus::Shipping);
        }

        #[rstest]
        #[tokio::test]
        async fn no_pending_orders_produces_an_empty_plan() {
            let store = MockOrderStore::seeded(&[]);

            let plan = generate_delivery_plan(&store, command(100), PlanPolicy::default())
                .await
                .unwrap();

            assert!(plan.is_empty());
        }
    }

    // =========================================================================
    // Conflict Retry
    // =========================================================================

    mod conflict_retry {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn conflicted_commit_is_retried() {
            let store = MockOrderStore::seeded(&[(2, 3), (3, 4)]);
            store.fail_next_commits(2);

            let plan = generate_delivery_plan(&store, command(5), PlanPolicy::default())
                .await
                .unwrap();

            assert_eq!(plan.total_value(), 7);
            assert_eq!(store.commits.load(Ordering::SeqCst), 1);
            assert_eq!(store.status_of(1), OrderStatus::Delivering);
            assert_eq!(store.status_of(2), OrderStatus::Delivering);
        }

        #[rstest]
        #[tokio::test]
        async fn exhausted_retries_surface_as_storage_error() {
            let store = MockOrderStore::seeded(&[(2, 3)]);
            store.fail_next_commits(10);

            let error = generate_delivery_plan(&store, command(5), PlanPolicy::default())
                .await
                .unwrap_err();

            assert!(error.is_storage());
            assert_eq!(store.status_of(1), OrderStatus::Shipping);
        }
    }

    // =========================================================================
    // Deadline
    // =========================================================================

    mod deadline {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn elapsed_deadline_reports_timeout_and_changes_nothing() {
            let store = MockOrderStore::seeded(&[(2, 3), (3, 4)]);
            store.delay_fetches_by(200);
            let policy = PlanPolicy::default().with_deadline(Duration::from_millis(10));

            let error = generate_delivery_plan(&store, command(5), policy)
                .await
                .unwrap_err();

            assert!(error.is_timeout());
            assert_eq!(store.status_of(1), OrderStatus::Shipping);
            assert_eq!(store.status_of(2), OrderStatus::Shipping);
        }
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    mod concurrency {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn concurrent_requests_claim_disjoint_orders() {
            let store = MockOrderStore::seeded(&[(1, 1), (1, 1), (1, 1), (1, 1), (1, 1), (1, 1)]);

            let first = {
                let store = store.clone();
                tokio::spawn(async move {
                    generate_delivery_plan(
                        &store,
                        GeneratePlanCommand::new("robot-a", 3).unwrap(),
                        PlanPolicy::default(),
                    )
                    .await
                    .unwrap()
                })
            };
            let second = {
                let store = store.clone();
                tokio::spawn(async move {
                    generate_delivery_plan(
                        &store,
                        GeneratePlanCommand::new("robot-b", 3).unwrap(),
                        PlanPolicy::default(),
                    )
                    .await
                    .unwrap()
                })
            };

            let first = first.await.unwrap();
            let second = second.await.unwrap();

            let mut all_ids: Vec<i64> = first
                .order_ids()
                .iter()
                .chain(second.order_ids().iter())
                .map(|id| id.value())
                .collect();
            let before_dedup = all_ids.len();
            all_ids.sort_unstable();
            all_ids.dedup();

            assert_eq!(all_ids.len(), before_dedup);
            assert_eq!(before_dedup, 6);
            for (_, status) in store.statuses() {
                assert_eq!(status, OrderStatus::Delivering);
            }
        }
    }
}
