//! Static rule tables, loaded once per analyzer

use std::collections::HashMap;

use crate::config::defaults::{CONFIRM_SCORE, ELEVATED_CONFIRM_SCORE};

/// Threshold and severity for one known anomaly type.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub anomaly_type: String,
    pub threshold: f64,
    pub severity: String,
}

/// `(anomaly_type, threshold, severity)`.
///
/// - `error_spike`: error rate (fraction of requests)
/// - `latency_spike`: milliseconds
/// - `ddos_pattern`: requests per source
const RULE_TABLE: &[(&str, f64, &str)] = &[
    ("error_spike", 0.10, "high"),
    ("latency_spike", 1000.0, "medium"),
    ("ddos_pattern", 100.0, "critical"),
];

/// Remediation actions per anomaly type, highest priority first.
const SUGGESTION_TABLE: &[(&str, &[&str])] = &[
    (
        "error_spike",
        &[
            "Check backend service health",
            "Review recent deployments",
            "Increase timeout values if needed",
        ],
    ),
    (
        "latency_spike",
        &[
            "Scale up backend instances",
            "Check database query performance",
            "Enable caching for frequently accessed resources",
        ],
    ),
    (
        "ddos_attack",
        &[
            "Enable rate limiting immediately",
            "Block suspicious IP ranges",
            "Contact DDoS mitigation provider",
        ],
    ),
    (
        "traffic_spike",
        &[
            "Verify if legitimate traffic increase",
            "Scale horizontally if needed",
            "Enable CDN caching",
        ],
    ),
];

/// Types confirmed at the elevated (lower) score threshold.
const ELEVATED_TYPES: &[&str] = &["ddos_attack", "data_exfiltration"];

/// Immutable rule tables for the lightweight analyzer.
#[derive(Debug, Clone)]
pub struct RuleSet {
    entries: HashMap<String, RuleEntry>,
    suggestions: HashMap<String, Vec<String>>,
    elevated_types: Vec<String>,
    confirm_score: f64,
    elevated_score: f64,
}

impl RuleSet {
    /// Build the built-in rule tables.
    pub fn load() -> Self {
        let entries = RULE_TABLE
            .iter()
            .map(|&(anomaly_type, threshold, severity)| {
                (
                    anomaly_type.to_string(),
                    RuleEntry {
                        anomaly_type: anomaly_type.to_string(),
                        threshold,
                        severity: severity.to_string(),
                    },
                )
            })
            .collect();

        let suggestions = SUGGESTION_TABLE
            .iter()
            .map(|&(anomaly_type, actions)| {
                (
                    anomaly_type.to_string(),
                    actions.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();

        Self {
            entries,
            suggestions,
            elevated_types: ELEVATED_TYPES.iter().map(|s| (*s).to_string()).collect(),
            confirm_score: CONFIRM_SCORE,
            elevated_score: ELEVATED_CONFIRM_SCORE,
        }
    }

    /// All threshold entries keyed by anomaly type.
    pub const fn entries(&self) -> &HashMap<String, RuleEntry> {
        &self.entries
    }

    pub fn entry(&self, anomaly_type: &str) -> Option<&RuleEntry> {
        self.entries.get(anomaly_type)
    }

    /// Mapped remediation actions, if the type is known.
    pub fn suggestions(&self, anomaly_type: &str) -> Option<&[String]> {
        self.suggestions.get(anomaly_type).map(Vec::as_slice)
    }

    /// Whether the type is confirmed at the elevated threshold.
    pub fn is_elevated(&self, anomaly_type: &str) -> bool {
        self.elevated_types.iter().any(|t| t == anomaly_type)
    }

    pub const fn confirm_score(&self) -> f64 {
        self.confirm_score
    }

    pub const fn elevated_score(&self) -> f64 {
        self.elevated_score
    }
}
