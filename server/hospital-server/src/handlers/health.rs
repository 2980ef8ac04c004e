use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::server::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Liveness plus a ping of the store
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.store.backend();
    let (status, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, format!("{backend}: healthy")),
        Err(e) => {
            tracing::warn!(backend, error = %e, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, format!("{backend}: unavailable"))
        }
    };

    let mut checks = HashMap::new();
    checks.insert("store".to_string(), store);

    let response = HealthResponse {
        status: if status.is_success() { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
    };

    (status, Json(response))
}
