//! Routing: the customer surface behind session auth, the robot
//! surface behind the API key.

use axum::routing::{get, post, put};
use axum::Router;
use robomart_workflow::ports::{OrderLedger, OrderStore, ProductCatalog, UserDirectory};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{require_robot_key, require_session, RequestIdLayer, RobotApiKey};
use crate::state::AppState;

// =============================================================================
// Router Creation
// =============================================================================

/// Builds the API router with all routes, middleware and state.
pub fn create_router<Store, Catalog, Users>(state: AppState<Store, Catalog, Users>) -> Router
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let customer_routes = Router::new()
        .route("/products", get(handlers::list_products::<Store, Catalog, Users>))
        .route(
            "/products/{product_id}",
            get(handlers::get_product::<Store, Catalog, Users>),
        )
        .route(
            "/orders",
            get(handlers::list_orders::<Store, Catalog, Users>)
                .post(handlers::create_orders::<Store, Catalog, Users>),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.sessions.clone(),
            require_session,
        ));

    let robot_routes = Router::new()
        .route(
            "/robot/delivery-plan",
            post(handlers::generate_plan::<Store, Catalog, Users>),
        )
        .route(
            "/robot/orders/{order_id}/status",
            put(handlers::update_order_status::<Store, Catalog, Users>),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            RobotApiKey(state.robot_api_key.clone()),
            require_robot_key,
        ));

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login::<Store, Catalog, Users>))
        .route("/logout", post(handlers::logout::<Store, Catalog, Users>))
        .merge(customer_routes)
        .merge(robot_routes);

    Router::new()
        .nest("/api", api)
        .layer(RequestIdLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// =============================================================================
// Tests
// =============================================================================
