//! Command implementations for the metric relay CLI
//!
//! This module contains the command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module.

pub mod check;
pub mod shared;
pub mod tail;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the metric relay
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `check`: finite replay of a monitor log with a summary report
/// - `tail`: follow a growing monitor log and relay new rows
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Check(check_args) => check::run_check(check_args).await,
        Commands::Tail(tail_args) => tail::run_tail(tail_args).await,
    }
}
