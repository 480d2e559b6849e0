//! System-wide default constants.
//!
//! Centralises the magic numbers of the analysis service.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Maximum accepted request body size (bytes). 1 MiB.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

// ============================================================================
// Analyzer
// ============================================================================

/// Analyzer mode used when neither config file, env nor CLI select one.
pub const DEFAULT_ANALYZER_MODE: &str = "lightweight";

/// Default location of full-model weights.
pub const DEFAULT_MODEL_PATH: &str = "/models";

/// Total timeout for one outbound proxy call (seconds).
pub const PROXY_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Lightweight Rules
// ============================================================================

/// Version tag reported in lightweight analysis metadata.
pub const RULES_VERSION: &str = "1.0";

/// Confidence reported when no anomaly reports were supplied.
pub const BASELINE_CONFIDENCE: f64 = 0.7;

/// Confidence after a report is confirmed.
pub const CONFIRMED_CONFIDENCE: f64 = 0.85;

/// Confidence after a report fails validation.
pub const LOW_CONFIDENCE: f64 = 0.5;

/// Any report scoring strictly above this is confirmed regardless of type.
pub const CONFIRM_SCORE: f64 = 80.0;

/// Reports of an elevated-risk type scoring strictly above this are confirmed.
pub const ELEVATED_CONFIRM_SCORE: f64 = 60.0;

// ============================================================================
// Request Bounds
// ============================================================================

/// Default `max_tokens` when the caller omits it.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Inclusive bounds on `max_tokens`.
pub const MIN_MAX_TOKENS: u32 = 1;
pub const MAX_MAX_TOKENS: u32 = 2000;

/// Default sampling temperature when the caller omits it.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
