pub mod convert;
pub mod health;

pub use convert::*;
pub use health::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::{logging_middleware, rate_limit_middleware};

/// Build the service router.
///
/// The configuration becomes router state, so every handler sees the same
/// `Config` the router was constructed with. The body limit sits one MiB
/// above the configured maximum so oversized uploads reach the typed size
/// check instead of the framework's 413.
pub fn create_router(config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/v1/convert", post(convert_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(
                    (config.max_file_size_mb + 1) * 1024 * 1024,
                ))
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(axum::middleware::from_fn(rate_limit_middleware)),
        )
        .with_state(config.clone())
}
