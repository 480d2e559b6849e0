//! Analysis Backend Module
//!
//! Provides a unified interface over the analysis backends. Exactly one
//! backend is built at startup and shared by every request.
//!
//! ## Backends
//!
//! - **LightweightAnalyzer**: rule-based validation, no GPU or network (default)
//! - **ProxyAnalyzer**: forwards to an external Grok API
//! - **FullModelAnalyzer**: in-process Grok-1, not supported; always fails
//!
//! ## Selection
//!
//! [`AnalyzerFactory::create`] maps a mode tag onto a backend. Unknown tags
//! and construction failures are returned unchanged so startup aborts.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

mod error;
mod full_model;
mod lightweight;
mod proxy;

pub use error::AnalyzerError;
pub use full_model::FullModelAnalyzer;
pub use lightweight::LightweightAnalyzer;
pub use proxy::ProxyAnalyzer;

use crate::config::AnalyzerConfig;
use crate::types::AnalysisResult;

/// Unified trait for analysis backends
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Assess traffic described by `prompt` and the optional `context`.
    async fn analyze(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
        context: Option<&Map<String, Value>>,
    ) -> Result<AnalysisResult, AnalyzerError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &'static str;
}

// ============================================================================
// Mode
// ============================================================================

/// Backend selector read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerMode {
    Lightweight,
    Full,
    Proxy,
}

impl AnalyzerMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lightweight => "lightweight",
            Self::Full => "full",
            Self::Proxy => "proxy",
        }
    }
}

impl FromStr for AnalyzerMode {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lightweight" => Ok(Self::Lightweight),
            "full" => Ok(Self::Full),
            "proxy" => Ok(Self::Proxy),
            other => Err(AnalyzerError::Configuration(format!("Unknown mode: {other}"))),
        }
    }
}

impl fmt::Display for AnalyzerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// The active backend.
#[derive(Debug)]
pub enum Analyzer {
    Lightweight(LightweightAnalyzer),
    Proxy(ProxyAnalyzer),
    Full(FullModelAnalyzer),
}

impl Analyzer {
    /// Get the backend name
    pub fn name(&self) -> &'static str {
        self.backend().backend_name()
    }

    pub const fn mode(&self) -> AnalyzerMode {
        match self {
            Self::Lightweight(_) => AnalyzerMode::Lightweight,
            Self::Proxy(_) => AnalyzerMode::Proxy,
            Self::Full(_) => AnalyzerMode::Full,
        }
    }

    /// Run the active backend.
    pub async fn analyze(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
        context: Option<&Map<String, Value>>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        self.backend()
            .analyze(prompt, max_tokens, temperature, context)
            .await
    }

    fn backend(&self) -> &dyn AnalysisBackend {
        match self {
            Self::Lightweight(b) => b,
            Self::Proxy(b) => b,
            Self::Full(b) => b,
        }
    }
}

/// Factory for creating analysis backends
pub struct AnalyzerFactory;

impl AnalyzerFactory {
    /// Create the backend named by `mode`.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::Configuration`] for an unknown mode, or proxy mode
    ///   without a base URL
    /// - [`AnalyzerError::UnsupportedMode`] for `full`
    pub fn create(mode: &str, config: &AnalyzerConfig) -> Result<Analyzer, AnalyzerError> {
        let mode: AnalyzerMode = mode.parse()?;

        tracing::info!(mode = %mode, "Creating analyzer");

        let analyzer = match mode {
            AnalyzerMode::Lightweight => Analyzer::Lightweight(LightweightAnalyzer::new()),
            AnalyzerMode::Full => Analyzer::Full(FullModelAnalyzer::new(&config.model_path)?),
            AnalyzerMode::Proxy => Analyzer::Proxy(ProxyAnalyzer::new(
                &config.grok_api_url,
                Duration::from_secs(config.proxy_timeout_secs),
            )?),
        };

        tracing::info!(backend = analyzer.name(), "Analyzer initialized");
        Ok(analyzer)
    }
}
