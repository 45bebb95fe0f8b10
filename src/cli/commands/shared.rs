//! Shared components for CLI commands
//!
//! This module contains the logging setup, layered configuration
//! resolution, and progress reporting used across the command
//! implementations.

use crate::cli::args::{CheckArgs, DimensionList, TailArgs};
use crate::config::RelayConfig;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging for the check command
pub fn setup_logging(args: &CheckArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metric_relay={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Set up structured logging for the tail command
pub fn setup_tail_logging(args: &TailArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metric_relay={}", log_level)));

    // Standard logging with timestamps
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration for the check command (file -> env -> args)
pub async fn load_configuration(args: &CheckArgs) -> Result<RelayConfig> {
    resolve_configuration(
        args.config_file.as_deref(),
        args.namespace.as_deref(),
        args.resolution,
        args.dimensions.as_ref(),
    )
    .await
}

/// Load configuration for the tail command (file -> env -> args)
pub async fn load_tail_configuration(args: &TailArgs) -> Result<RelayConfig> {
    resolve_configuration(
        args.config_file.as_deref(),
        args.namespace.as_deref(),
        args.resolution,
        args.dimensions.as_ref(),
    )
    .await
}

/// Resolve the layered configuration shared by both commands
async fn resolve_configuration(
    config_file: Option<&Path>,
    namespace: Option<&str>,
    resolution: Option<u32>,
    dimensions: Option<&DimensionList>,
) -> Result<RelayConfig> {
    info!("Loading configuration");

    // Probe the default config location only when none was given
    let default_config_path = if config_file.is_none() {
        RelayConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match config_file {
        Some(path) => Some(path),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = RelayConfig::load_layered(config_file)?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, namespace, resolution, dimensions)?;

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(
    config: &mut RelayConfig,
    namespace: Option<&str>,
    resolution: Option<u32>,
    dimensions: Option<&DimensionList>,
) -> Result<()> {
    if let Some(namespace) = namespace {
        config.namespace = namespace.to_string();
    }

    if let Some(resolution) = resolution {
        config.storage_resolution_seconds = Some(resolution);
    }

    if let Some(list) = dimensions {
        config.dimensions = list.dimensions.clone();
    }

    Ok(())
}

/// Create a progress bar with appropriate styling for byte totals
pub fn create_progress_bar(total_bytes: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
