//! # Check Subcommand
//!
//! Validates the environment against a schema without writing any files.
//! With `--json` the outcome is printed as a machine-readable report and
//! a validation failure exits with status 1 instead of an error chain.

use std::error::Error as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use typed_env_schema::{generate_executable, EnvSource};

use crate::{read_schema, DEFAULT_SCHEMA_PATH};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (YAML, or JSON with a `.json` extension).
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of a check, as printed with `--json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    /// Whether every variable validated.
    pub ok: bool,
    /// Number of schema keys validated; zero on failure.
    pub validated: usize,
    /// The first failing key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Field error for `key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validate `env` against the schema and build a report.
pub fn check_env(args: &CheckArgs, env: &impl EnvSource) -> Result<CheckReport> {
    let schema = read_schema(&args.schema)?;
    let report = match generate_executable(&schema, env) {
        Ok(_) => CheckReport {
            ok: true,
            validated: schema.len(),
            key: None,
            error: None,
        },
        Err(e) => CheckReport {
            ok: false,
            validated: 0,
            key: Some(e.key().to_string()),
            error: e.source().map(|cause| cause.to_string()),
        },
    };
    Ok(report)
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, env: &impl EnvSource) -> Result<u8> {
    let report = check_env(args, env)?;
    let code = if report.ok { 0 } else { 1 };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(code);
    }

    match (&report.key, &report.error) {
        (Some(key), Some(error)) => {
            anyhow::bail!("environment check failed: {key}: {error}")
        }
        _ => println!("ok: {} variables validated", report.validated),
    }
    Ok(code)
}
