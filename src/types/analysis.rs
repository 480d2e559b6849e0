//! Request / result types for `/analyze`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::defaults::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, MAX_MAX_TOKENS, MIN_MAX_TOKENS,
};

/// Inbound analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub prompt: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
}

const fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

const fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl AnalysisRequest {
    /// Request with default sampling parameters and no context.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            context: None,
        }
    }

    /// Attach a context object.
    #[must_use]
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    /// Prompt length in characters, as logged per request.
    pub fn prompt_chars(&self) -> usize {
        self.prompt.chars().count()
    }

    /// Check the sampling parameters against their documented bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(&self.max_tokens) {
            return Err(format!(
                "max_tokens must be between {MIN_MAX_TOKENS} and {MAX_MAX_TOKENS}, got {}",
                self.max_tokens
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

/// Output of every analyzer variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Human-readable narrative
    pub response: String,
    /// Confidence in the assessment (0.0-1.0)
    pub confidence: f64,
    /// One line per processed anomaly report, absent when none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<Vec<String>>,
    /// Remediation actions in priority order, absent when none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// `null` or absent reads as an empty map
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub metadata: Map<String, Value>,
}

impl AnalysisResult {
    pub fn confidence_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `Some(items)` unless `items` is empty.
pub(crate) fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"prompt": "why is checkout slow?"})).expect("parse");
        assert_eq!(req.max_tokens, 500);
        assert!((req.temperature - 0.3).abs() < f64::EPSILON);
        assert!(req.context.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_requires_prompt() {
        let parsed: Result<AnalysisRequest, _> = serde_json::from_value(json!({"max_tokens": 10}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_bounds() {
        let mut req = AnalysisRequest::new("p");
        req.max_tokens = 0;
        assert!(req.validate().unwrap_err().contains("max_tokens"));

        req.max_tokens = 2000;
        assert!(req.validate().is_ok());
        req.max_tokens = 2001;
        assert!(req.validate().is_err());

        req.max_tokens = 10;
        req.temperature = 1.5;
        assert!(req.validate().unwrap_err().contains("temperature"));
        req.temperature = 0.0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_result_omits_empty_lists() {
        let result = AnalysisResult {
            response: "ok".to_string(),
            confidence: 0.7,
            anomalies: None,
            suggestions: None,
            metadata: Map::new(),
        };
        let v = serde_json::to_value(&result).expect("serialize");
        assert!(v.get("anomalies").is_none());
        assert!(v.get("suggestions").is_none());
        assert_eq!(v["confidence"], json!(0.7));
    }

    #[test]
    fn test_result_requires_response_and_confidence() {
        let missing: Result<AnalysisResult, _> =
            serde_json::from_value(json!({"response": "text"}));
        assert!(missing.is_err());

        let minimal: AnalysisResult =
            serde_json::from_value(json!({"response": "text", "confidence": 0.9})).expect("parse");
        assert!(minimal.metadata.is_empty());
        assert!(minimal.confidence_in_range());
    }

    #[test]
    fn test_result_accepts_null_metadata() {
        let result: AnalysisResult = serde_json::from_value(
            json!({"response": "r", "confidence": 0.5, "metadata": null}),
        )
        .expect("null metadata should parse");
        assert!(result.metadata.is_empty());

        let typed: Result<AnalysisResult, _> = serde_json::from_value(
            json!({"response": "r", "confidence": 0.5, "metadata": "text"}),
        );
        assert!(typed.is_err());
    }

    #[test]
    fn test_with_context_attaches_map() {
        let mut ctx = Map::new();
        ctx.insert("anomalies".to_string(), json!([]));
        let req = AnalysisRequest::new("p").with_context(ctx.clone());
        assert_eq!(req.context, Some(ctx));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_prompt_chars_counts_characters() {
        let req = AnalysisRequest::new("latência ↑");
        assert_eq!(req.prompt_chars(), 10);
        assert!(req.prompt.len() > 10);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Vec::new()), None);
        assert_eq!(non_empty(vec!["a".to_string()]), Some(vec!["a".to_string()]));
    }
}
