//! Check command implementation for the metric relay CLI
//!
//! Replays a complete monitor log through the relay with the logging
//! sink attached, then reports what would have been submitted to a
//! real backend. Useful for verifying schema derivation, unit
//! classification, and row health before wiring up a transport.

use super::shared::{create_progress_bar, load_configuration, setup_logging};
use crate::app::services::metric_sink::LoggingSink;
use crate::app::services::relay::{MetricRelay, RelayState};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Check command runner for the metric relay
///
/// Replays the given file line by line:
/// 1. Set up logging and configuration
/// 2. Feed every line through a relay backed by the logging sink
/// 3. Report ingestion statistics in the requested format
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(&args)?;

    info!("Starting monitor log check");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    // Load configuration with layered approach
    let config = load_configuration(&args).await?;
    debug!("Loaded configuration: {:?}", config);

    let mut relay = MetricRelay::new(config, Arc::new(LoggingSink));

    let file_size = tokio::fs::metadata(&args.file)
        .await
        .map_err(|e| {
            Error::io(
                format!("Failed to stat monitor log '{}'", args.file.display()),
                e,
            )
        })?
        .len();

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(file_size, "Replaying monitor log"));

    let file = File::open(&args.file).await.map_err(|e| {
        Error::io(
            format!("Failed to open monitor log '{}'", args.file.display()),
            e,
        )
    })?;
    let mut lines = BufReader::new(file).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| Error::io("Failed to read monitor log", e))?
    {
        relay.handle_line(&line).await;

        if let Some(pb) = &progress {
            pb.inc(line.len() as u64 + 1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    // Give outstanding submission tasks a chance to settle before the
    // failure counter is read for the report
    tokio::task::yield_now().await;

    generate_report(&args, &relay, start_time.elapsed())?;

    // A log without a single usable header is a configuration problem
    // worth a non-zero exit
    if relay.state() == RelayState::AwaitingSchema {
        return Err(Error::invalid_header(format!(
            "No header line found in '{}'",
            args.file.display()
        )));
    }

    Ok(())
}

/// Generate the summary report in the requested format
fn generate_report(args: &CheckArgs, relay: &MetricRelay, elapsed: Duration) -> Result<()> {
    info!("Generating check report");

    match args.output_format {
        OutputFormat::Human => generate_human_report(args, relay, elapsed),
        OutputFormat::Json => generate_json_report(args, relay, elapsed),
    }
}

fn generate_human_report(args: &CheckArgs, relay: &MetricRelay, elapsed: Duration) -> Result<()> {
    let stats = relay.stats();

    println!("\n{}", "Monitor Log Check".bright_green().bold());
    println!(
        "  {} {}",
        "File:".bright_cyan(),
        args.file.display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Namespace:".bright_cyan(),
        relay.config().namespace.bright_white()
    );
    println!(
        "  {} {}",
        "Lines received:".bright_cyan(),
        stats.lines_received.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Header lines:".bright_cyan(),
        stats.header_lines.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows translated:".bright_cyan(),
        stats.rows_translated.to_string().bright_white().bold()
    );
    if stats.rows_skipped > 0 {
        println!(
            "  {} {}",
            "Rows skipped:".bright_red(),
            stats.rows_skipped.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Datapoints emitted:".bright_cyan(),
        stats.points_emitted.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Batches submitted:".bright_cyan(),
        stats.batches_submitted.to_string().bright_white()
    );
    if relay.failed_batches() > 0 {
        println!(
            "  {} {}",
            "Batches failed:".bright_red(),
            relay.failed_batches().to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {:.1}%",
        "Success rate:".bright_cyan(),
        stats.success_rate()
    );
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(elapsed).to_string().bright_white()
    );

    if !stats.errors.is_empty() {
        println!("\n{}", "Row Errors".bright_red().bold());
        for error in stats.errors.iter().take(10) {
            println!("  {}", error);
        }
        if stats.errors.len() > 10 {
            println!("  ... and {} more", stats.errors.len() - 10);
        }
    }

    println!();
    Ok(())
}

fn generate_json_report(args: &CheckArgs, relay: &MetricRelay, elapsed: Duration) -> Result<()> {
    let report = build_json_report(args, relay, elapsed);
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
    Ok(())
}

fn build_json_report(args: &CheckArgs, relay: &MetricRelay, elapsed: Duration) -> serde_json::Value {
    let stats = relay.stats();
    serde_json::json!({
        "file": args.file.display().to_string(),
        "namespace": relay.config().namespace,
        "lines_received": stats.lines_received,
        "header_lines": stats.header_lines,
        "rows_translated": stats.rows_translated,
        "rows_skipped": stats.rows_skipped,
        "points_emitted": stats.points_emitted,
        "batches_submitted": stats.batches_submitted,
        "batches_failed": relay.failed_batches(),
        "success_rate_percent": stats.success_rate(),
        "processing_time_seconds": elapsed.as_secs_f64(),
        "errors": stats.errors,
    })
}
