//! # assetreg CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and runs one registry
//! transaction against the snapshot file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use assetreg_cli::{run_transaction, CliConfig, TxCommand, TxOutcome};

/// Asset registry host.
///
/// Runs one transaction handler per invocation against a world-state
/// snapshot. Results go to stdout as a single line; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "assetreg", version, about, long_about = None)]
struct Cli {
    /// World-state snapshot file (defaults to $ASSETREG_STATE, then world-state.json).
    #[arg(long, global = true, value_name = "PATH")]
    state: Option<PathBuf>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: TxCommand,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::resolve(cli.state, cli.verbose);

    // RUST_LOG, when set, overrides the -v flags.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(state = %config.state_path.display(), "assetreg starting");

    match run_transaction(&config, &cli.command).await {
        Ok(outcome) => {
            match &outcome {
                TxOutcome::Ok(out) => println!("{out}"),
                TxOutcome::Rejected(msg) => eprintln!("{msg}"),
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
