//! Analyzer error taxonomy

/// Errors raised while constructing or running an analyzer.
///
/// `Configuration` and `UnsupportedMode` only occur at construction and must
/// abort startup. `Upstream`, `Transport` and `InvalidResponse` are
/// request-scoped and come from the proxy backend.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),
    #[error("Grok API error ({status}): {body}")]
    Upstream { status: u16, body: String },
    #[error("Grok API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid Grok API response: {0}")]
    InvalidResponse(String),
}

impl AnalyzerError {
    /// Whether this error is fatal at startup.
    pub const fn is_startup_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::UnsupportedMode(_))
    }

    /// Whether the proxy call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
