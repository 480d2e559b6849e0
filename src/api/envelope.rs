//! Consistent error envelope for all endpoints.
//!
//! Successful `/analyze` responses are the bare [`AnalysisResult`] so that a
//! proxy-mode instance can front another instance. Failures are wrapped in
//! [`ApiErrorResponse`] to give callers a uniform JSON shape.
//!
//! [`AnalysisResult`]: crate::types::AnalysisResult

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::analyzer::AnalyzerError;

/// Metadata included in every error response.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub version: &'static str,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Error detail inside [`ApiErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Error response: `{ "error": { "code": "...", "message": "..." }, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    fn build(status: StatusCode, code: &str, msg: impl Into<String>) -> Response {
        let body = Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: msg.into(),
            },
            meta: ResponseMeta::default(),
        };
        (status, axum::Json(body)).into_response()
    }

    pub fn unprocessable(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST", msg)
    }

    pub fn internal(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
    }

    pub fn not_implemented(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED", msg)
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg)
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg)
    }

    pub fn gateway_timeout(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", msg)
    }

    /// Map an analyzer failure onto an HTTP status.
    ///
    /// | error             | status |
    /// |-------------------|--------|
    /// | `Upstream`        | 502    |
    /// | `InvalidResponse` | 502    |
    /// | `Transport`       | 503, or 504 on timeout |
    /// | `UnsupportedMode` | 501    |
    /// | `Configuration`   | 500    |
    pub fn from_analyzer_error(err: &AnalyzerError) -> Response {
        let msg = err.to_string();
        match err {
            AnalyzerError::Upstream { .. } | AnalyzerError::InvalidResponse(_) => {
                Self::bad_gateway(msg)
            }
            AnalyzerError::Transport(_) if err.is_timeout() => Self::gateway_timeout(msg),
            AnalyzerError::Transport(_) => Self::service_unavailable(msg),
            AnalyzerError::UnsupportedMode(_) => Self::not_implemented(msg),
            AnalyzerError::Configuration(_) => Self::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let resp = ApiErrorResponse::unprocessable("max_tokens out of range");
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "INVALID_REQUEST");
        assert_eq!(v["error"]["message"], "max_tokens out of range");
        assert!(v["meta"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_maps_to_bad_gateway() {
        let err = AnalyzerError::Upstream {
            status: 500,
            body: "boom".to_string(),
        };
        let resp = ApiErrorResponse::from_analyzer_error(&err);
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "UPSTREAM_ERROR");
        assert!(v["error"]["message"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn test_startup_errors_map_to_server_errors() {
        let resp = ApiErrorResponse::from_analyzer_error(&AnalyzerError::UnsupportedMode(
            "full".to_string(),
        ));
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

        let resp = ApiErrorResponse::from_analyzer_error(&AnalyzerError::Configuration(
            "bad".to_string(),
        ));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = ApiErrorResponse::from_analyzer_error(&AnalyzerError::InvalidResponse(
            "not json".to_string(),
        ));
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
