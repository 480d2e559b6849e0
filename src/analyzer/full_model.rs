//! Full Grok-1 model backend (placeholder)
//!
//! Running the 314B-parameter model in-process is not supported. Selecting
//! this mode fails at construction so the service never starts serving
//! with a backend that cannot answer.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{AnalysisBackend, AnalyzerError};
use crate::types::AnalysisResult;

const UNSUPPORTED_GUIDANCE: &str = "Full Grok-1 mode requires downloading the 314B parameter model. \
     Use 'lightweight' or 'proxy' mode instead.";

/// Placeholder for in-process Grok-1 inference.
#[derive(Debug)]
pub struct FullModelAnalyzer {
    model_path: String,
}

impl FullModelAnalyzer {
    /// Always fails with [`AnalyzerError::UnsupportedMode`].
    pub fn new(model_path: &str) -> Result<Self, AnalyzerError> {
        tracing::warn!(model_path = %model_path, "Full Grok-1 mode requires significant GPU memory");
        tracing::warn!("Full Grok-1 mode is a placeholder and cannot load weights");
        Err(unsupported())
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}

#[async_trait]
impl AnalysisBackend for FullModelAnalyzer {
    async fn analyze(
        &self,
        _prompt: &str,
        _max_tokens: u32,
        _temperature: f64,
        _context: Option<&Map<String, Value>>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        Err(unsupported())
    }

    fn backend_name(&self) -> &'static str {
        "full"
    }
}

fn unsupported() -> AnalyzerError {
    AnalyzerError::UnsupportedMode(UNSUPPORTED_GUIDANCE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_always_fails() {
        let err = FullModelAnalyzer::new("/models").unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedMode(_)));
        assert!(err.to_string().contains("'lightweight' or 'proxy'"));
        assert!(err.is_startup_error());
    }

    #[tokio::test]
    async fn test_analyze_fails_identically() {
        let analyzer = FullModelAnalyzer {
            model_path: "/models".to_string(),
        };
        let err = analyzer.analyze("p", 10, 0.1, None).await.unwrap_err();
        assert_eq!(err.to_string(), unsupported().to_string());
        assert_eq!(analyzer.model_path(), "/models");
    }
}
