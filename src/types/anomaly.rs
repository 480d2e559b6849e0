//! Anomaly types: AnomalyReport, ValidationOutcome

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single traffic irregularity reported by the upstream gateway.
///
/// Read-only to the analyzer. Fields other than the three known ones are
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    #[serde(default)]
    pub anomaly_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub score: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnomalyReport {
    /// Build a report from an arbitrary JSON value.
    ///
    /// Never fails: a non-object value, a non-string type/severity or a
    /// non-numeric score degrade to `""`, `""` and `0.0` respectively.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let extra = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "anomaly_type" | "severity" | "score"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            anomaly_type: text("anomaly_type"),
            severity: text("severity"),
            score: obj.get("score").and_then(Value::as_f64).unwrap_or(0.0),
            extra,
        }
    }
}

/// Verdict on one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub report: AnomalyReport,
    pub confirmed: bool,
    /// Confidence the analyzer adopts after processing this report
    pub confidence_contribution: f64,
}

impl ValidationOutcome {
    /// Narrative line for this outcome.
    pub fn summary(&self) -> String {
        if self.confirmed {
            format!(
                "Confirmed: {} - {}",
                self.report.anomaly_type, self.report.severity
            )
        } else {
            format!("Low confidence: {}", self.report.anomaly_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_known_fields() {
        let report = AnomalyReport::from_value(&json!({
            "anomaly_type": "error_spike",
            "severity": "high",
            "score": 91,
            "route": "/api/orders"
        }));
        assert_eq!(report.anomaly_type, "error_spike");
        assert_eq!(report.severity, "high");
        assert!((report.score - 91.0).abs() < f64::EPSILON);
        assert_eq!(report.extra.get("route"), Some(&json!("/api/orders")));
        assert!(!report.extra.contains_key("score"));
    }

    #[test]
    fn test_from_value_degrades_missing_fields() {
        let report = AnomalyReport::from_value(&json!({}));
        assert_eq!(report, AnomalyReport::default());
    }

    #[test]
    fn test_from_value_degrades_wrong_types() {
        let report = AnomalyReport::from_value(&json!({
            "anomaly_type": 7,
            "severity": null,
            "score": "95"
        }));
        assert_eq!(report.anomaly_type, "");
        assert_eq!(report.severity, "");
        assert!(report.score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_value_non_object() {
        assert_eq!(AnomalyReport::from_value(&json!("ddos")), AnomalyReport::default());
        assert_eq!(AnomalyReport::from_value(&json!(null)), AnomalyReport::default());
    }

    #[test]
    fn test_summary_lines() {
        let report = AnomalyReport {
            anomaly_type: "ddos_attack".to_string(),
            severity: "critical".to_string(),
            score: 70.0,
            extra: Map::new(),
        };
        let confirmed = ValidationOutcome {
            report: report.clone(),
            confirmed: true,
            confidence_contribution: 0.85,
        };
        let denied = ValidationOutcome {
            report,
            confirmed: false,
            confidence_contribution: 0.5,
        };
        assert_eq!(confirmed.summary(), "Confirmed: ddos_attack - critical");
        assert_eq!(denied.summary(), "Low confidence: ddos_attack");
    }
}
