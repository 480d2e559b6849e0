//! Remediation suggestions per anomaly type

use std::sync::Arc;

use super::RuleSet;

/// Returned alone for any type without a mapping.
pub const FALLBACK_SUGGESTION: &str = "Monitor the situation closely";

/// Maps an anomaly type to its ordered remediation actions.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    rules: Arc<RuleSet>,
}

impl SuggestionGenerator {
    pub const fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Ordered suggestions for `anomaly_type`, never empty.
    ///
    /// `severity` does not influence selection yet.
    pub fn suggestions_for(&self, anomaly_type: &str, _severity: &str) -> Vec<String> {
        self.rules
            .suggestions(anomaly_type)
            .map_or_else(|| vec![FALLBACK_SUGGESTION.to_string()], <[String]>::to_vec)
    }
}
