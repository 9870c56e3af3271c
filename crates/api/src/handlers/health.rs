use axum::Json;

use crate::dto::response::HealthResponse;

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
