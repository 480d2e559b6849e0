//! Grok inference service
//!
//! AI-assisted traffic analysis for the API gateway.
//!
//! # Usage
//!
//! ```bash
//! # Rule-based analysis (default)
//! cargo run --release
//!
//! # Forward to an external Grok API
//! GROK_MODE=proxy GROK_API_URL=http://grok:8000 cargo run --release
//! ```
//!
//! # Environment Variables
//!
//! - `GROK_CONFIG`: Path to a TOML config file (default: ./grok_service.toml)
//! - `GROK_MODE`: `lightweight`, `full` or `proxy` (default: lightweight)
//! - `GROK_API_URL`: External Grok API base URL (required for proxy mode)
//! - `MODEL_PATH`: Model weights location (full mode)
//! - `PORT`: Listen port (default: 8000)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use grok_inference::api::{create_app_with_limit, AppState};
use grok_inference::{AnalyzerFactory, ServiceConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "grok-inference")]
#[command(about = "Traffic-analysis inference service for the API gateway")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file; load errors are fatal when given here
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Analyzer mode: lightweight, full or proxy (overrides GROK_MODE)
    #[arg(short, long)]
    mode: Option<String>,

    /// Override the server address (default: "0.0.0.0:8000")
    #[arg(short, long)]
    addr: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

// ============================================================================
// Startup
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Resolve configuration: file (or search order), then env, then CLI.
fn resolve_config(args: &CliArgs) -> Result<ServiceConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = ServiceConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
        None => ServiceConfig::load(),
    };

    if let Some(mode) = &args.mode {
        config.analyzer.mode.clone_from(mode);
    }
    if let Some(addr) = &args.addr {
        config.server.addr.clone_from(addr);
    }

    config.validate().context("Invalid service configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let config = resolve_config(&args)?;

    info!(mode = %config.analyzer.mode, "Starting Grok inference service");

    let analyzer = match AnalyzerFactory::create(&config.analyzer.mode, &config.analyzer) {
        Ok(analyzer) => Arc::new(analyzer),
        Err(e) => {
            error!(error = %e, mode = %config.analyzer.mode, "Failed to initialize analyzer");
            return Err(e).context("Analyzer initialization failed");
        }
    };

    let app = create_app_with_limit(AppState::new(analyzer), config.server.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.addr))?;

    info!("✓ HTTP server listening on {}", config.server.addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("✓ Grok inference service shutdown complete");
    Ok(())
}
