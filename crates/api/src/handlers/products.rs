//! Product catalogue endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use robomart_domain::product::ProductId;
use robomart_workflow::ports::{OrderLedger, OrderStore, ProductCatalog, UserDirectory};
use robomart_workflow::workflows::product::{get_product as get_product_workflow, list_products as list_products_workflow};

use crate::dto::request::ListQuery;
use crate::dto::response::{PageResponse, ProductResponse};
use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /api/products`
pub async fn list_products<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<ProductResponse>>, ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let request = query.into_product_request()?;

    let page = list_products_workflow(state.catalog.as_ref(), request).await?;

    Ok(Json(PageResponse::from_page(&page)))
}

/// `GET /api/products/{product_id}`
pub async fn get_product<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    Path(product_id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let product_id = ProductId::new(product_id)
        .map_err(|error| ApiError::validation(error.to_string()))?;

    let product = get_product_workflow(state.catalog.as_ref(), product_id).await?;

    Ok(Json(ProductResponse::from(&product)))
}
