//! Tail command implementation for the metric relay CLI
//!
//! Follows a growing monitor log the way the statistics logger writes
//! it: poll for appended bytes, buffer the trailing partial line until
//! its newline arrives, and reset to the top when the file shrinks
//! (truncation or rotation-in-place).

use super::shared::{load_tail_configuration, setup_tail_logging};
use crate::app::services::metric_sink::LoggingSink;
use crate::app::services::monitor_parser::is_header_line;
use crate::app::services::relay::{MetricRelay, RelayState};
use crate::cli::args::TailArgs;
use crate::{Error, Result};
use std::io::SeekFrom;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, info, warn};

/// Tail command runner for the metric relay
///
/// Runs until interrupted:
/// 1. Set up logging and configuration
/// 2. Prime the schema from existing content (or replay it all with
///    `--from-start`)
/// 3. Poll the file and relay every completed line that arrives
pub async fn run_tail(args: TailArgs) -> Result<()> {
    // Set up logging
    setup_tail_logging(&args)?;

    info!("Starting monitor log tail");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    // Load configuration with layered approach
    let config = load_tail_configuration(&args).await?;
    debug!("Loaded configuration: {:?}", config);

    let mut relay = MetricRelay::new(config, Arc::new(LoggingSink));

    let mut offset: u64 = if args.from_start {
        0
    } else {
        prime_schema(&mut relay, &args.file).await?
    };

    if relay.state() == RelayState::AwaitingSchema && !args.from_start {
        info!("No header in existing content, waiting for one to arrive");
    }

    info!(file = %args.file.display(), offset, "Following monitor log");

    let interval = Duration::from_millis(args.poll_interval_ms);
    let mut partial = String::new();

    loop {
        match tokio::fs::metadata(&args.file).await {
            Ok(metadata) => {
                let len = metadata.len();

                if len < offset {
                    warn!("Monitor log shrank, re-reading from the start");
                    offset = 0;
                    partial.clear();
                }

                if len > offset {
                    offset =
                        relay_new_content(&mut relay, &args.file, offset, &mut partial).await?;
                }
            }
            Err(error) => {
                // Rotation gap: keep polling until the file reappears
                debug!(%error, "Monitor log unavailable, retrying");
            }
        }

        tokio::time::sleep(interval).await;
    }
}

/// Establish the schema from existing content without relaying rows
///
/// Feeds only header candidates through the relay, so restarting the
/// tail does not resubmit months of old datapoints. Returns the offset
/// just past the last complete line; a trailing partial line stays
/// unread for the follow loop to complete.
async fn prime_schema(relay: &mut MetricRelay, path: &Path) -> Result<u64> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::io(
            format!("Failed to read monitor log '{}'", path.display()),
            e,
        )
    })?;

    let complete = match content.rfind('\n') {
        Some(newline) => &content[..=newline],
        None => return Ok(0),
    };

    for line in complete.lines() {
        let fields: Vec<&str> = line.split(',').collect();
        if is_header_line(&fields) {
            relay.handle_line(line).await;
        }
    }

    if let Some(schema) = relay.schema() {
        info!(
            columns = schema.len(),
            metrics = schema.metric_count(),
            "Primed schema from existing log content"
        );
    }

    Ok(complete.len() as u64)
}

/// Relay everything appended since `offset`
///
/// Bytes after the last newline are buffered in `partial` until a later
/// read completes the line. Returns the new offset.
async fn relay_new_content(
    relay: &mut MetricRelay,
    path: &Path,
    offset: u64,
    partial: &mut String,
) -> Result<u64> {
    let mut file = File::open(path).await.map_err(|e| {
        Error::io(
            format!("Failed to open monitor log '{}'", path.display()),
            e,
        )
    })?;

    file.seek(SeekFrom::Start(offset))
        .await
        .map_err(|e| Error::io("Failed to seek in monitor log", e))?;

    let mut chunk = String::new();
    let read = file
        .read_to_string(&mut chunk)
        .await
        .map_err(|e| Error::io("Failed to read monitor log", e))? as u64;

    partial.push_str(&chunk);

    while let Some(newline) = partial.find('\n') {
        let line: String = partial.drain(..=newline).collect();
        relay.handle_line(line.trim_end_matches(['\r', '\n'])).await;
    }

    Ok(offset + read)
}
