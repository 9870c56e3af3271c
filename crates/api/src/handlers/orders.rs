//! Customer order endpoints: placement and history listing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use robomart_workflow::ports::{OrderLedger, OrderStore, ProductCatalog, UserDirectory};
use robomart_workflow::workflows::order::{
    list_orders as list_orders_workflow, place_orders, OrderLine, PlaceOrdersCommand,
};

use crate::dto::request::{ListQuery, PlaceOrdersRequest};
use crate::dto::response::{OrderIdsResponse, OrderSummaryResponse, PageResponse};
use crate::errors::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// `GET /api/orders`
pub async fn list_orders<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<OrderSummaryResponse>>, ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let request = query.into_order_request()?;

    let page = list_orders_workflow(state.store.as_ref(), user_id, request).await?;

    Ok(Json(PageResponse::from_page(&page)))
}

/// `POST /api/orders`
pub async fn create_orders<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<PlaceOrdersRequest>,
) -> Result<(StatusCode, Json<OrderIdsResponse>), ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let lines = request
        .items
        .iter()
        .map(|item| OrderLine::new(item.product_id, item.quantity))
        .collect::<Result<Vec<_>, _>>()?;
    let command = PlaceOrdersCommand::new(user_id, lines)?;

    let order_ids = place_orders(state.store.as_ref(), command).await?;

    let body = OrderIdsResponse {
        order_ids: order_ids.iter().map(|id| id.value()).collect(),
    };
    Ok((StatusCode::CREATED, Json(body)))
}
