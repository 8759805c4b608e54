//! # nv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; tracing verbosity is driven by repeated `-v`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nv_cli::parse::{run_parse, ParseArgs};
use nv_cli::scan::{run_scan, ScanArgs};
use nv_cli::verify::{run_verify, VerifyArgs};

/// Nightvenue scanner CLI
///
/// Door-side toolchain for club/event check-in: the interactive scanner
/// console, one-shot ticket verification, and offline NV1 payload
/// inspection. All verification happens server-side; this tool parses,
/// posts, and displays.
#[derive(Parser, Debug)]
#[command(name = "nv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive scanner console against stdin.
    Scan(ScanArgs),

    /// Verify a single NV1 payload against the backend.
    Verify(VerifyArgs),

    /// Decode an NV1 payload and print the triple. No network.
    Parse(ParseArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("nv CLI starting");

    let result = match cli.command {
        Commands::Scan(args) => run_scan(&args).await,
        Commands::Verify(args) => run_verify(&args).await,
        Commands::Parse(args) => run_parse(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
