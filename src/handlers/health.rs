use axum::{http::StatusCode, response::Json};
use std::time::SystemTime;
use tracing::info;

use crate::error::AppResult;
use crate::middleware::rate_limit::get_rate_limit_metrics;
use crate::models::{HealthResponse, RateLimitStatus, ServiceStatus};
use crate::services::PageComposer;

/// Health check endpoint
pub async fn health_handler() -> AppResult<Json<HealthResponse>> {
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let converter = PageComposer::default().is_available();
    let (total_requests, rejected_requests, available_permits) = get_rate_limit_metrics();

    let status = if converter { "healthy" } else { "degraded" };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp,
        services: ServiceStatus { converter },
        rate_limiting: RateLimitStatus {
            total_requests,
            rejected_requests,
            available_permits,
        },
    };

    info!(
        status = status,
        converter_available = converter,
        "Health check completed"
    );

    Ok(Json(response))
}

/// Readiness check endpoint (for Kubernetes/Railway)
pub async fn ready_handler() -> Result<StatusCode, StatusCode> {
    if PageComposer::default().is_available() {
        Ok(StatusCode::OK)
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
