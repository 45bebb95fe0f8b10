//! Command-line argument definitions for the metric relay
//!
//! This module defines the complete CLI interface using the clap derive
//! API. Both subcommands share the configuration override flags so a
//! log can be checked with exactly the settings it would be tailed with.

use crate::app::models::Dimension;
use crate::constants::TAIL_POLL_INTERVAL_MS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the metric relay
///
/// Relays self-describing tabular statistics logs (comma-separated
/// lines with a leading header row) to a metrics backend as typed,
/// batched datapoints.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metric-relay",
    version,
    about = "Relay tabular server statistics logs to a metrics backend",
    long_about = "Consumes monitor logs whose first line is a header describing the columns, \
                  derives metric names and units from that header, and relays every data row \
                  to a metrics backend as typed, batched datapoints. Survives malformed rows, \
                  repeated headers, and column layout changes without interrupting the stream."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the metric relay
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Replay a complete monitor log and report what would be submitted
    Check(CheckArgs),
    /// Follow a growing monitor log and relay rows as they arrive
    Tail(TailArgs),
}

/// Arguments for the check command (finite replay with a summary)
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Monitor log file to replay
    ///
    /// The first line should be the header row the statistics logger
    /// prints on startup. Everything the relay would submit goes to the
    /// logging sink instead of a remote backend.
    #[arg(value_name = "FILE", help = "Monitor log file to replay")]
    pub file: PathBuf,

    /// Path to configuration file
    ///
    /// TOML configuration file with namespace, storage resolution, and
    /// dimensions. If not specified, looks for
    /// ~/.config/metric-relay/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Metric namespace override
    ///
    /// Namespace the datapoints are filed under at the backend.
    /// Overrides the configuration file and environment.
    #[arg(
        short = 'n',
        long = "namespace",
        value_name = "NAME",
        help = "Metric namespace override"
    )]
    pub namespace: Option<String>,

    /// Storage resolution override in seconds
    ///
    /// Resolution hint attached to every submission. Overrides the
    /// configuration file and environment.
    #[arg(
        long = "resolution",
        value_name = "SECONDS",
        help = "Storage resolution override in seconds"
    )]
    pub resolution: Option<u32>,

    /// Dimension set override (comma-separated key=value pairs)
    ///
    /// Replaces the configured dimension set entirely. An empty string
    /// clears it, including the default hostname dimension.
    #[arg(
        short = 'd',
        long = "dimensions",
        value_name = "LIST",
        help = "Dimension override as key=value,key2=value2"
    )]
    pub dimensions: Option<DimensionList>,

    /// Output format for the summary report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and the summary report. Overrides verbose
    /// settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the tail command (follow a growing log)
#[derive(Debug, Clone, Parser)]
pub struct TailArgs {
    /// Monitor log file to follow
    ///
    /// The relay scans existing content for the most recent header to
    /// establish the schema, then follows the file for new rows.
    #[arg(value_name = "FILE", help = "Monitor log file to follow")]
    pub file: PathBuf,

    /// Relay existing content before following
    ///
    /// By default only the schema is taken from existing content and
    /// submission starts with rows appended after startup. This flag
    /// relays every existing row first.
    #[arg(long = "from-start", help = "Relay existing rows before following")]
    pub from_start: bool,

    /// Poll interval in milliseconds
    ///
    /// How often the file is checked for new content. Truncation resets
    /// the read position to the start of the file.
    #[arg(
        long = "poll-interval",
        value_name = "MILLIS",
        default_value_t = TAIL_POLL_INTERVAL_MS,
        help = "Poll interval in milliseconds"
    )]
    pub poll_interval_ms: u64,

    /// Path to configuration file
    ///
    /// TOML configuration file with namespace, storage resolution, and
    /// dimensions. If not specified, looks for
    /// ~/.config/metric-relay/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Metric namespace override
    #[arg(
        short = 'n',
        long = "namespace",
        value_name = "NAME",
        help = "Metric namespace override"
    )]
    pub namespace: Option<String>,

    /// Storage resolution override in seconds
    #[arg(
        long = "resolution",
        value_name = "SECONDS",
        help = "Storage resolution override in seconds"
    )]
    pub resolution: Option<u32>,

    /// Dimension set override (comma-separated key=value pairs)
    #[arg(
        short = 'd',
        long = "dimensions",
        value_name = "LIST",
        help = "Dimension override as key=value,key2=value2"
    )]
    pub dimensions: Option<DimensionList>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for the check summary
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated dimension lists
#[derive(Debug, Clone)]
pub struct DimensionList {
    pub dimensions: Vec<Dimension>,
}

impl FromStr for DimensionList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(DimensionList {
            dimensions: Dimension::parse_list(s)?,
        })
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl CheckArgs {
    /// Validate the check command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::file_not_found(self.file.display().to_string()));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl TailArgs {
    /// Validate the tail command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::file_not_found(self.file.display().to_string()));
        }

        if self.poll_interval_ms == 0 {
            return Err(Error::configuration(
                "Poll interval must be at least one millisecond".to_string(),
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_check_args(file: PathBuf) -> CheckArgs {
        CheckArgs {
            file,
            config_file: None,
            namespace: None,
            resolution: None,
            dimensions: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_dimension_list_parsing() {
        // Valid list
        let result = DimensionList::from_str("host=web1,region=eu").unwrap();
        assert_eq!(result.dimensions.len(), 2);
        assert_eq!(result.dimensions[0].name, "host");
        assert_eq!(result.dimensions[1].value, "eu");

        // Empty string clears the set
        let result = DimensionList::from_str("").unwrap();
        assert!(result.dimensions.is_empty());

        // Entry without '='
        let result = DimensionList::from_str("host");
        assert!(result.is_err());
    }

    #[test]
    fn test_check_args_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Threads,time").unwrap();

        let args = create_check_args(file.path().to_path_buf());
        assert!(args.validate().is_ok());

        // Nonexistent input file
        let args = create_check_args(PathBuf::from("/nonexistent/monitor.log"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_check_args_rejects_missing_config() {
        let file = NamedTempFile::new().unwrap();

        let mut args = create_check_args(file.path().to_path_buf());
        args.config_file = Some(PathBuf::from("/nonexistent/config.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_tail_args_validation() {
        let file = NamedTempFile::new().unwrap();

        let mut args = TailArgs {
            file: file.path().to_path_buf(),
            from_start: false,
            poll_interval_ms: TAIL_POLL_INTERVAL_MS,
            config_file: None,
            namespace: None,
            resolution: None,
            dimensions: None,
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_ok());

        args.poll_interval_ms = 0;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = create_check_args(PathBuf::from("monitor.log"));

        // Default level
        assert_eq!(args.get_log_level(), "warn");

        // Verbose levels
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        // Quiet mode
        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_show_progress() {
        let mut args = create_check_args(PathBuf::from("monitor.log"));
        assert!(args.show_progress());

        args.quiet = true;
        assert!(!args.show_progress());
    }
}
