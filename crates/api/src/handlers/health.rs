use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "Music Production API";

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /api/health -- returns service and database health.
///
/// Always 200 so load balancers keep routing while the database recovers.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = studio_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
