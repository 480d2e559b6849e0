//! Shared data structures for the traffic-analysis service
//!
//! - AnomalyReport / ValidationOutcome: one upstream-detected irregularity
//!   and the verdict the rule engine reached on it
//! - AnalysisRequest: inbound `/analyze` body
//! - AnalysisResult: the single output shape shared by every analyzer

mod anomaly;
mod analysis;

pub use anomaly::*;
pub use analysis::*;
