use clap::Parser;
use metric_relay::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the command until it finishes or the user interrupts it.
        // Interruption is the normal way to stop a tail, so it exits
        // cleanly.
        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Ok(())
            }
        }
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Metric Relay - Monitor Log to Metrics Backend");
    println!("=============================================");
    println!();
    println!("Relay self-describing tabular statistics logs to a metrics backend");
    println!("as typed, batched datapoints. The leading header row drives metric");
    println!("names and unit classification; no per-log configuration is needed.");
    println!();
    println!("USAGE:");
    println!("    metric-relay <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    check       Replay a complete monitor log and report what would be submitted");
    println!("    tail        Follow a growing monitor log and relay rows as they arrive");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Verify a captured log parses cleanly:");
    println!("    metric-relay check monitor.log");
    println!();
    println!("    # Same, with a summary for scripting:");
    println!("    metric-relay check monitor.log --output-format json");
    println!();
    println!("    # Follow the live log with a custom namespace:");
    println!("    metric-relay tail /var/log/lightstreamer/monitor.log --namespace Production -v");
    println!();
    println!("    # Get help for specific commands:");
    println!("    metric-relay check --help");
    println!("    metric-relay tail --help");
    println!();
    println!("For detailed help on any command, use:");
    println!("    metric-relay <COMMAND> --help");
}
