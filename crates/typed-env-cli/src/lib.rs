//! # typed-env-cli — Command-Line Interface
//!
//! Drives the typed-env generators from a schema file, for builds that do
//! not embed the plugin directly.
//!
//! ## Subcommands
//!
//! - `typed-env generate` — write the declaration, print the module source.
//! - `typed-env check` — validate the environment without writing anything.
//! - `typed-env dts` — print the declaration only.
//!
//! ```bash
//! typed-env generate --schema typed-env.yaml --dts ./typed-env.d.ts --out env.js
//! typed-env check --schema typed-env.yaml --json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; generation logic lives in `typed-env-schema`.
//! - Handlers take the environment as a parameter so they can be tested
//!   without touching the process environment.

pub mod check;
pub mod declare;
pub mod generate;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use typed_env_schema::{load_schema, Schema};

/// Schema file used when `--schema` is not given.
pub const DEFAULT_SCHEMA_PATH: &str = "typed-env.yaml";

/// Load a schema file, attaching the path to any failure.
pub fn read_schema(path: &Path) -> Result<Schema> {
    load_schema(path).with_context(|| format!("failed to load schema: {}", path.display()))
}

/// Write `content` to `out`, or to stdout when `out` is `None`.
pub fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")
        }
    }
}
