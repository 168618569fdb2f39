//! Restarting pods report CLI
//!
//! Lists pods with restarting containers, not-ready containers and pods in
//! abnormal phases, optionally exporting the restart records to CSV.

mod commands;
mod config;
mod output;

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code used when the run is interrupted
const EXIT_INTERRUPTED: u8 = 2;

/// Restarting pods report
#[derive(Debug, Parser)]
#[command(name = "restpods")]
#[command(author, version, about = "Returns the list of pods with restarting containers", long_about = None)]
pub struct Cli {
    /// Report namespace (all namespaces if not specified)
    pub namespace: Option<String>,

    /// Period (in days) of the report [default: 2]
    #[arg(short, long)]
    pub period: Option<u32>,

    /// Export the result to a .csv file
    #[arg(short, long)]
    pub export: bool,

    /// Ignore pod warnings
    #[arg(short, long)]
    pub ignore_warnings: bool,

    /// Remove header and remaining information, printing the report only
    #[arg(short, long)]
    pub remove_headers: bool,

    /// Quiet mode, print no report
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: output::OutputFormat,

    /// Time zone for report timestamps (IANA name, e.g. America/Sao_Paulo)
    #[arg(long, env = "RESTPODS_TIME_ZONE")]
    pub time_zone: Option<String>,

    /// Path to a configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read pods from a `kubectl get pods -o json` file instead of the cluster
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    let settings = match config::Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        result = commands::report::run(&cli, &settings) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                output::print_error(&format!("{:#}", e));
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nExecution aborted.");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}
