//! Service Configuration Module
//!
//! Provides the analysis service configuration loaded from TOML files, with
//! the legacy deployment environment variables layered on top.
//!
//! ## Loading Order
//!
//! 1. `GROK_CONFIG` environment variable (path to TOML file)
//! 2. `grok_service.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Then `GROK_MODE`, `GROK_API_URL`, `MODEL_PATH` and `PORT` override
//! whatever the file said. The loaded value is passed by reference into
//! the analyzer factory and the router; there is no global config.

mod service_config;
pub mod defaults;

pub use service_config::*;
