use axum::Json;
use sales_domain::HealthStatus;

/// Health check endpoint
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

pub async fn index() -> &'static str {
    "Sales Command Center API"
}
