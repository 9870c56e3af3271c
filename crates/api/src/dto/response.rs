//! Serialized response bodies.

use chrono::{DateTime, Utc};
use robomart_domain::delivery::{DeliveryPlan, ShippingOrder};
use robomart_domain::product::Product;
use robomart_workflow::ports::{OrderSummary, Page};
use serde::Serialize;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub const fn healthy() -> Self {
        Self { status: "healthy" }
    }
}

// =============================================================================
// Delivery Plans
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryPlanResponse {
    pub robot_id: String,
    pub total_weight: i64,
    pub total_value: i64,
    pub orders: Vec<PlanOrderResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOrderResponse {
    pub order_id: i64,
    pub weight: i64,
    pub value: i64,
}

impl From<&ShippingOrder> for PlanOrderResponse {
    fn from(order: &ShippingOrder) -> Self {
        Self {
            order_id: order.order_id().value(),
            weight: order.weight(),
            value: order.value(),
        }
    }
}

impl From<&DeliveryPlan> for DeliveryPlanResponse {
    fn from(plan: &DeliveryPlan) -> Self {
        Self {
            robot_id: plan.robot_id().as_str().to_string(),
            total_weight: plan.total_weight(),
            total_value: plan.total_value(),
            orders: plan.orders().iter().map(PlanOrderResponse::from).collect(),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderIdsResponse {
    pub order_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryResponse {
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub shipped_status: String,
    pub created_at: DateTime<Utc>,
    pub arrived_at: Option<DateTime<Utc>>,
}

impl From<&OrderSummary> for OrderSummaryResponse {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            order_id: summary.order_id.value(),
            product_id: summary.product_id.value(),
            product_name: summary.product_name.clone(),
            shipped_status: summary.shipped_status.as_str().to_string(),
            created_at: summary.created_at,
            arrived_at: summary.arrived_at,
        }
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub value: i64,
    pub weight: i64,
    pub image: String,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id.value(),
            name: product.name.clone(),
            description: product.description.clone(),
            value: product.value,
            weight: product.weight,
            image: product.image.clone(),
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn from_page<Source>(page: &Page<Source>) -> Self
    where
        for<'a> T: From<&'a Source>,
    {
        Self {
            items: page.items.iter().map(T::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
