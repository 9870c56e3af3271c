//! Robot-facing endpoints: delivery-plan generation and completion
//! reports. Both sit behind the API-key gate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use robomart_workflow::ports::{OrderLedger, OrderStore, ProductCatalog, UserDirectory};
use robomart_workflow::workflows::delivery::{
    generate_delivery_plan, update_order_status as update_order_status_workflow,
    GeneratePlanCommand, UpdateStatusCommand,
};

use crate::dto::request::{GeneratePlanRequest, UpdateStatusRequest};
use crate::dto::response::DeliveryPlanResponse;
use crate::errors::ApiError;
use crate::state::AppState;

/// `POST /api/robot/delivery-plan`
pub async fn generate_plan<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<Json<DeliveryPlanResponse>, ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let command = GeneratePlanCommand::new(request.robot_id, request.capacity)?;

    let plan = generate_delivery_plan(state.store.as_ref(), command, state.plan_policy).await?;

    Ok(Json(DeliveryPlanResponse::from(&plan)))
}

/// `PUT /api/robot/orders/{order_id}/status`
pub async fn update_order_status<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    Path(order_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode, ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let command = UpdateStatusCommand::new(order_id, &request.status)?;

    update_order_status_workflow(state.store.as_ref(), command).await?;

    Ok(StatusCode::NO_CONTENT)
}
