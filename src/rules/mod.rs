//! Lightweight rule engine
//!
//! Static tables plus the three stages the lightweight analyzer drives for
//! every request:
//!
//! - **RuleSet**: anomaly type → threshold/severity, anomaly type →
//!   remediation list, and the score policy used for validation
//! - **AnomalyValidator**: confirm or deny one report
//! - **SuggestionGenerator**: ordered remediation actions for a type
//! - **NarrativeBuilder**: the human-readable summary
//!
//! Everything here is immutable after construction, so a single instance is
//! shared across concurrent requests without locking.

mod narrative;
mod ruleset;
mod suggestions;
mod validator;

pub use narrative::{NarrativeBuilder, NO_ANOMALIES_NARRATIVE};
pub use ruleset::{RuleEntry, RuleSet};
pub use suggestions::{SuggestionGenerator, FALLBACK_SUGGESTION};
pub use validator::AnomalyValidator;
