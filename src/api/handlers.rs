//! API handlers: health and analysis

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::envelope::ApiErrorResponse;
use crate::analyzer::Analyzer;
use crate::types::AnalysisRequest;

// ============================================================================
// Shared State
// ============================================================================

/// Router state: the process-wide analyzer plus bookkeeping for `/health`.
#[derive(Clone)]
pub struct AppState {
    /// `None` only when the router is built without a backend
    pub analyzer: Option<Arc<Analyzer>>,
    /// Configured mode tag, reported even when no analyzer exists
    pub mode: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self {
            mode: analyzer.mode().to_string(),
            analyzer: Some(analyzer),
            started_at: Instant::now(),
        }
    }

    /// State with no backend; `/analyze` answers 503.
    pub fn uninitialized(mode: impl Into<String>) -> Self {
        Self {
            analyzer: None,
            mode: mode.into(),
            started_at: Instant::now(),
        }
    }
}

// ============================================================================
// Health Endpoint
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when an analyzer is loaded
    pub status: String,
    pub mode: String,
    pub model_loaded: bool,
    /// Seconds since the state was created
    pub uptime: f64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.analyzer.is_some();
    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "unhealthy" }.to_string(),
        mode: state.mode.clone(),
        model_loaded,
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

// ============================================================================
// Analyze Endpoint
// ============================================================================

/// POST /analyze - Validate reported anomalies and produce a narrative
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    if let Err(msg) = request.validate() {
        return ApiErrorResponse::unprocessable(msg);
    }

    let Some(analyzer) = state.analyzer.as_ref() else {
        return ApiErrorResponse::service_unavailable("Model not initialized");
    };

    info!(
        prompt_len = request.prompt_chars(),
        backend = analyzer.name(),
        "Analyzing request"
    );

    match analyzer
        .analyze(
            &request.prompt,
            request.max_tokens,
            request.temperature,
            request.context.as_ref(),
        )
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            error!(error = %e, backend = analyzer.name(), "Analysis failed");
            ApiErrorResponse::from_analyzer_error(&e)
        }
    }
}
