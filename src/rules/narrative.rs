//! Human-readable analysis summary

use std::fmt::Write;

/// Narrative returned when no anomaly lines were produced.
pub const NO_ANOMALIES_NARRATIVE: &str = "No significant anomalies detected in the analyzed traffic patterns. All metrics appear to be within normal ranges.";

pub struct NarrativeBuilder;

impl NarrativeBuilder {
    /// Assemble the narrative from anomaly lines and suggestions.
    ///
    /// With no anomalies the fixed sentence is returned and suggestions are
    /// ignored. Otherwise both lists are rendered 1-indexed in input order,
    /// the actions section only when there are suggestions.
    pub fn build(anomalies: &[String], suggestions: &[String]) -> String {
        if anomalies.is_empty() {
            return NO_ANOMALIES_NARRATIVE.to_string();
        }

        let mut out = String::from("Analysis Results:\n\n");
        let _ = writeln!(out, "Detected {} anomalies:", anomalies.len());
        push_numbered(&mut out, anomalies);

        if !suggestions.is_empty() {
            out.push_str("\nRecommended Actions:\n");
            push_numbered(&mut out, suggestions);
        }

        out
    }
}

fn push_numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item);
    }
}
