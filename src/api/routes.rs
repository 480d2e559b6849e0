//! API route definitions
//!
//! - GET  /health  - liveness plus whether the analyzer is loaded
//! - POST /analyze - traffic analysis

use axum::{routing::{get, post}, Router};

use super::handlers::{self, AppState};

/// Create all API routes
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze", post(handlers::analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, LightweightAnalyzer};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(Arc::new(Analyzer::Lightweight(LightweightAnalyzer::new())))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_health() {
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_analyze() {
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(post_json("/analyze", r#"{"prompt": "anything odd?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyze_without_model_is_503() {
        let app = api_routes(AppState::uninitialized("lightweight"));

        let response = app
            .oneshot(post_json("/analyze", r#"{"prompt": "anything odd?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_bounds_checked_before_model_presence() {
        let app = api_routes(AppState::uninitialized("lightweight"));

        let response = app
            .oneshot(post_json("/analyze", r#"{"prompt": "p", "max_tokens": 0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analyze_rejects_out_of_range_temperature() {
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(post_json("/analyze", r#"{"prompt": "p", "temperature": 1.5}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analyze_get_not_allowed() {
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/analyze").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
