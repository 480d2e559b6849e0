//! Service Configuration - bind address, body limits and analyzer selection
//!
//! Each struct implements `Default` with the values the service shipped
//! with, so a missing config file means zero-change behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GROK_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "grok_service.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one analysis service process.
///
/// Load with `ServiceConfig::load()` which searches:
/// 1. `$GROK_CONFIG` env var
/// 2. `./grok_service.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Analyzer backend selection
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl ServiceConfig {
    /// Load configuration using the standard search order, then apply the
    /// process environment on top.
    pub fn load() -> Self {
        let mut config = Self::load_file_or_default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    fn load_file_or_default() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), mode = %config.analyzer.mode, "Loaded service config from GROK_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from GROK_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "GROK_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./grok_service.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(mode = %config.analyzer.mode, "Loaded service config from ./grok_service.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./grok_service.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No grok_service.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the legacy deployment variables (`GROK_MODE`, `GROK_API_URL`,
    /// `MODEL_PATH`, `PORT`) using `lookup` to resolve them.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("GROK_MODE") {
            self.analyzer.mode = mode;
        }
        if let Some(url) = lookup("GROK_API_URL") {
            self.analyzer.grok_api_url = url;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.analyzer.model_path = path;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.addr = with_port(&self.server.addr, port),
                Err(_) => warn!(port = %port, "Ignoring non-numeric PORT"),
            }
        }
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check values that would make the server unusable.
    ///
    /// Mode and proxy URL are validated by the analyzer factory, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.analyzer.proxy_timeout_secs == 0 {
            errors.push("analyzer.proxy_timeout_secs must be > 0".to_string());
        }
        if self.server.body_limit_bytes == 0 {
            errors.push("server.body_limit_bytes must be > 0".to_string());
        }
        if self.server.addr.trim().is_empty() {
            errors.push("server.addr must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Replace the port of a `host:port` address, keeping the host.
fn with_port(addr: &str, port: u16) -> String {
    let host = match addr.rsplit_once(':') {
        Some((host, _)) if !host.is_empty() => host,
        _ => "0.0.0.0",
    };
    format!("{host}:{port}")
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by the `PORT` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Maximum inbound request body (bytes)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_server_addr() -> String {
    defaults::DEFAULT_SERVER_ADDR.to_string()
}

const fn default_body_limit() -> usize {
    defaults::DEFAULT_BODY_LIMIT_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Analyzer backend selection and per-backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// One of `lightweight`, `full`, `proxy`. Kept as a raw string so an
    /// unknown value reaches the factory and is reported there.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Base URL of the external Grok API (proxy mode only)
    #[serde(default)]
    pub grok_api_url: String,

    /// Model weights location (full mode only)
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Total timeout for one proxied call
    #[serde(default = "default_proxy_timeout")]
    pub proxy_timeout_secs: u64,
}

fn default_mode() -> String {
    defaults::DEFAULT_ANALYZER_MODE.to_string()
}

fn default_model_path() -> String {
    defaults::DEFAULT_MODEL_PATH.to_string()
}

const fn default_proxy_timeout() -> u64 {
    defaults::PROXY_TIMEOUT_SECS
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            grok_api_url: String::new(),
            model_path: default_model_path(),
            proxy_timeout_secs: default_proxy_timeout(),
        }
    }
}
