use robomart_domain::order::UserId;

use crate::errors::WorkflowError;
use crate::ports::{OrderLedger, OrderListRequest, OrderSummary, Page};

/// Maximum page size the listing accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Lists one user's order history with search, sort and pagination
/// applied at the query level.
///
/// # Errors
///
/// Returns [`WorkflowError::InvalidArgument`] for out-of-range page
/// sizes and [`WorkflowError::Storage`] on query failure.
pub async fn list_orders<L: OrderLedger>(
    ledger: &L,
    user_id: UserId,
    request: OrderListRequest,
) -> Result<Page<OrderSummary>, WorkflowError> {
    let page_size = request.pagination.page_size;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(WorkflowError::invalid_argument(format!(
            "page_size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, page_size
        )));
    }

    Ok(ledger.list_orders(user_id, &request).await?)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Pagination, StoreError};
    use async_trait::async_trait;
    use rstest::rstest;

    #[derive(Clone, Default)]
    struct EmptyLedger;

    #[async_trait]
    impl OrderLedger for EmptyLedger {
        async fn list_orders(
            &self,
            _user_id: UserId,
            request: &OrderListRequest,
        ) -> Result<Page<OrderSummary>, StoreError> {
            Ok(Page::new(Vec::new(), 0, request.pagination))
        }
    }

    fn user() -> UserId {
        UserId::new(1).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn delegates_to_the_ledger() {
        let page = list_orders(&EmptyLedger, user(), OrderListRequest::default())
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    #[tokio::test]
    async fn rejects_out_of_range_page_sizes(#[case] page_size: u32) {
        let request = OrderListRequest {
            pagination: Pagination::new(0, page_size),
            ..OrderListRequest::default()
        };

        let error = list_orders(&EmptyLedger, user(), request).await.unwrap_err();

        assert!(error.is_invalid_argument());
    }
}
