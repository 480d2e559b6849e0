//! Confirm / deny a single anomaly report

use std::sync::Arc;

use super::RuleSet;
use crate::config::defaults::{CONFIRMED_CONFIDENCE, LOW_CONFIDENCE};
use crate::types::{AnomalyReport, ValidationOutcome};

/// Score-based validator.
///
/// - `score > confirm_score` → confirmed for any type
/// - `score > elevated_score` → confirmed for elevated types only
/// - otherwise low confidence
///
/// Total over its input: a report with missing fields has score 0 and an
/// empty type, which never confirms.
#[derive(Debug, Clone)]
pub struct AnomalyValidator {
    rules: Arc<RuleSet>,
}

impl AnomalyValidator {
    pub const fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn validate(&self, report: &AnomalyReport) -> bool {
        if report.score > self.rules.confirm_score() {
            return true;
        }
        report.score > self.rules.elevated_score() && self.rules.is_elevated(&report.anomaly_type)
    }

    /// Validate and attach the confidence this verdict implies.
    pub fn assess(&self, report: &AnomalyReport) -> ValidationOutcome {
        let confirmed = self.validate(report);
        ValidationOutcome {
            report: report.clone(),
            confirmed,
            confidence_contribution: if confirmed {
                CONFIRMED_CONFIDENCE
            } else {
                LOW_CONFIDENCE
            },
        }
    }
}
