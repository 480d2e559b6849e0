//! REST API module using Axum
//!
//! HTTP surface of the analysis service:
//! - `POST /analyze` runs the process-wide analyzer
//! - `GET /health` reports mode, whether the analyzer is loaded, and uptime

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::{AppState, HealthResponse};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::defaults::DEFAULT_BODY_LIMIT_BYTES;

/// Create the application router with the default body limit.
pub fn create_app(state: AppState) -> Router {
    create_app_with_limit(state, DEFAULT_BODY_LIMIT_BYTES)
}

/// Create the application router, rejecting bodies over `body_limit` bytes.
pub fn create_app_with_limit(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(routes::api_routes(state))
        // Middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
