//! # rscore CLI entry point
//!
//! Parses command-line arguments, installs logging, resolves configuration
//! and dispatches to subcommand handlers. Logs go to stderr; stdout carries
//! only JSON results.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rscore_cli::check::run_check;
use rscore_cli::lookup::{run_lookup, LookupArgs};
use rscore_cli::predict::{run_predict, PredictArgs};
use rscore_cli::resolve_config;
use rscore_scoring::bootstrap;

/// Retail store viability scoring.
///
/// Scores a candidate store location from the demographics registered for
/// its pincode and the store's own attributes.
#[derive(Parser, Debug)]
#[command(name = "rscore", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Location registry CSV.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Directory holding the model artifacts.
    #[arg(long, global = true, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one request, or a batch from a JSON array payload.
    Predict(PredictArgs),

    /// Print the demographics registered for a pincode.
    Lookup(LookupArgs),

    /// Load the registry and artifacts and report what was loaded.
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "rscore starting");

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = resolve_config(cli.config.as_deref(), cli.data, cli.model_dir)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Predict(args) => {
            let context = bootstrap(&config).context("bootstrap failed")?;
            run_predict(&args, &context, &mut stdout)
        }
        Commands::Lookup(args) => run_lookup(&args, &config, &mut stdout),
        Commands::Check => run_check(&config, &mut stdout),
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
