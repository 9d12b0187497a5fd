//! # Generate Subcommand
//!
//! Runs full plugin setup: writes the declaration file, validates the
//! environment, and emits the `virtual:typed-env` module source.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use typed_env_schema::{EnvSource, PluginOptions, TypedEnvPlugin, DEFAULT_DTS_PATH};

use crate::{read_schema, write_output, DEFAULT_SCHEMA_PATH};

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema file (YAML, or JSON with a `.json` extension).
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Where to write the TypeScript declaration.
    #[arg(long, default_value = DEFAULT_DTS_PATH)]
    pub dts: PathBuf,

    /// Where to write the module source. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the generate subcommand.
pub fn run_generate(args: &GenerateArgs, env: &impl EnvSource) -> Result<u8> {
    let schema = read_schema(&args.schema)?;
    tracing::info!(
        schema = %args.schema.display(),
        fields = schema.len(),
        "generating typed-env module"
    );

    let plugin = TypedEnvPlugin::setup(PluginOptions::new(schema).dts(&args.dts), env)
        .context("typed-env setup failed")?;

    write_output(args.out.as_deref(), plugin.executable())?;
    if let Some(out) = &args.out {
        tracing::info!(path = %out.display(), "wrote module source");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use typed_env_schema::EnvSnapshot;

    #[test]
    fn test_generate_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("typed-env.yaml");
        std::fs::write(&schema, "fields: { PORT: { kind: number } }").unwrap();

        let args = GenerateArgs {
            schema,
            dts: dir.path().join("typed-env.d.ts"),
            out: Some(dir.path().join("env.js")),
        };
        let env: EnvSnapshot = [("PORT", "8080")].into_iter().collect();

        assert_eq!(run_generate(&args, &env).unwrap(), 0);

        let dts = std::fs::read_to_string(&args.dts).unwrap();
        assert!(dts.contains("export const PORT: number;"));
        let js = std::fs::read_to_string(args.out.as_ref().unwrap()).unwrap();
        assert!(js.contains("export const PORT = 8080;"));
    }

    #[test]
    fn test_generate_reports_failing_key() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("typed-env.yaml");
        std::fs::write(&schema, "fields: { PORT: { kind: number } }").unwrap();

        let args = GenerateArgs {
            schema,
            dts: dir.path().join("typed-env.d.ts"),
            out: Some(dir.path().join("env.js")),
        };
        let env: EnvSnapshot = [("PORT", "eighty")].into_iter().collect();

        let err = run_generate(&args, &env).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("Error while parsing field \"PORT\""), "{chain}");
        assert!(chain.contains("Invalid number"), "{chain}");
        assert!(!args.out.as_ref().unwrap().exists());
    }
}
