//! Lightweight rule-based analyzer
//!
//! Default production backend: no GPU, no network. Re-validates the
//! anomalies the gateway already detected and attaches remediation advice.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use super::{AnalysisBackend, AnalyzerError};
use crate::config::defaults::{BASELINE_CONFIDENCE, RULES_VERSION};
use crate::rules::{AnomalyValidator, NarrativeBuilder, RuleSet, SuggestionGenerator};
use crate::types::{non_empty, AnalysisResult, AnomalyReport};

/// Rule-engine backend. Holds only read-only tables.
#[derive(Debug, Clone)]
pub struct LightweightAnalyzer {
    rules: Arc<RuleSet>,
    validator: AnomalyValidator,
    suggestions: SuggestionGenerator,
}

impl Default for LightweightAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LightweightAnalyzer {
    pub fn new() -> Self {
        let rules = Arc::new(RuleSet::load());
        tracing::info!(rules = rules.entries().len(), "Initializing lightweight analyzer");
        Self {
            validator: AnomalyValidator::new(Arc::clone(&rules)),
            suggestions: SuggestionGenerator::new(Arc::clone(&rules)),
            rules,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run the rule engine over `context.anomalies`.
    ///
    /// Confidence is overwritten by each report in turn, so the final value
    /// reflects the last report only. Suggestions accumulate across reports
    /// without de-duplication.
    pub fn evaluate(&self, context: Option<&Map<String, Value>>) -> AnalysisResult {
        let mut anomalies = Vec::new();
        let mut suggestions = Vec::new();
        let mut confidence = BASELINE_CONFIDENCE;

        let reports = context
            .and_then(|ctx| ctx.get("anomalies"))
            .and_then(Value::as_array);

        if let Some(reports) = reports {
            for raw in reports {
                let report = AnomalyReport::from_value(raw);
                let outcome = self.validator.assess(&report);

                anomalies.push(outcome.summary());
                confidence = outcome.confidence_contribution;

                suggestions.extend(
                    self.suggestions
                        .suggestions_for(&report.anomaly_type, &report.severity),
                );
            }
        }

        let response = NarrativeBuilder::build(&anomalies, &suggestions);

        tracing::debug!(
            anomalies = anomalies.len(),
            suggestions = suggestions.len(),
            confidence = confidence,
            "Lightweight analysis complete"
        );

        let mut metadata = Map::new();
        metadata.insert("analyzer".to_string(), Value::from("lightweight"));
        metadata.insert("rules_version".to_string(), Value::from(RULES_VERSION));
        metadata.insert("analyzed_at".to_string(), Value::from(Utc::now().to_rfc3339()));

        AnalysisResult {
            response,
            confidence,
            anomalies: non_empty(anomalies),
            suggestions: non_empty(suggestions),
            metadata,
        }
    }
}

#[async_trait]
impl AnalysisBackend for LightweightAnalyzer {
    /// `prompt`, `max_tokens` and `temperature` do not affect rule evaluation.
    async fn analyze(
        &self,
        _prompt: &str,
        _max_tokens: u32,
        _temperature: f64,
        context: Option<&Map<String, Value>>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        Ok(self.evaluate(context))
    }

    fn backend_name(&self) -> &'static str {
        "lightweight"
    }
}
