//! # typed-env CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Logs go to stderr so generated source on stdout can be piped.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use typed_env_cli::check::{run_check, CheckArgs};
use typed_env_cli::declare::{run_dts, DtsArgs};
use typed_env_cli::generate::{run_generate, GenerateArgs};
use typed_env_schema::EnvSnapshot;

/// typed-env: validate environment variables against a schema and generate
/// a typed `virtual:typed-env` module.
#[derive(Parser, Debug)]
#[command(name = "typed-env", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the declaration file and emit the validated module source.
    Generate(GenerateArgs),

    /// Validate the environment without generating anything.
    Check(CheckArgs),

    /// Emit the TypeScript declaration only.
    Dts(DtsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("typed-env CLI v{} starting", env!("CARGO_PKG_VERSION"));

    // Captured once; every lookup in a run sees the same values.
    let env = EnvSnapshot::capture();

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args, &env),
        Commands::Check(args) => run_check(&args, &env),
        Commands::Dts(args) => run_dts(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
