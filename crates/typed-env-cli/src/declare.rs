//! Declaration-only subcommand. Never reads the environment.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use typed_env_schema::dts;

use crate::{read_schema, write_output, DEFAULT_SCHEMA_PATH};

/// Arguments for the dts subcommand.
#[derive(Args, Debug)]
pub struct DtsArgs {
    /// Schema file (YAML, or JSON with a `.json` extension).
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Where to write the declaration. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the dts subcommand.
pub fn run_dts(args: &DtsArgs) -> Result<u8> {
    let schema = read_schema(&args.schema)?;
    write_output(args.out.as_deref(), &dts(&schema))?;
    Ok(0)
}
