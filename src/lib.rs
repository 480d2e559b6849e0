//! Grok inference service: traffic-analysis second pass for the API gateway
//!
//! The gateway detects raw statistical anomalies (error-rate spikes, latency
//! spikes, suspicious request patterns) and posts them here for validation
//! and a human-readable narrative.
//!
//! ## Architecture
//!
//! - **Rules**: static thresholds, score policy and remediation tables
//! - **Analyzer**: one backend per process (lightweight, proxy, full)
//! - **API**: axum router exposing `/analyze` and `/health`
//! - **Config**: TOML file plus legacy environment overrides

pub mod analyzer;
pub mod api;
pub mod config;
pub mod rules;
pub mod types;

// Re-export configuration
pub use config::{AnalyzerConfig, ConfigError, ServerConfig, ServiceConfig};

// Re-export commonly used types
pub use types::{AnalysisRequest, AnalysisResult, AnomalyReport, ValidationOutcome};

// Re-export analyzer components
pub use analyzer::{
    AnalysisBackend, Analyzer, AnalyzerError, AnalyzerFactory, AnalyzerMode, FullModelAnalyzer,
    LightweightAnalyzer, ProxyAnalyzer,
};

// Re-export rule engine
pub use rules::{AnomalyValidator, NarrativeBuilder, RuleEntry, RuleSet, SuggestionGenerator};
