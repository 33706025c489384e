//! Health check handler
//!
//! Simple status indicator for load balancers and uptime monitoring.
//! No sensitive information (commit hashes, build timestamps) is exposed.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    /// Status indicator (always "ok")
    pub status: String,
    pub message: String,
}

/// GET /health. No authentication required.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}
