//! # Virtual Module Plugin
//!
//! The build-tool side of typed-env. Setup runs once per build:
//!
//! 1. generate the declaration and write it to the configured path;
//! 2. generate the executable module from the environment and keep it.
//!
//! Afterwards the host asks [`TypedEnvPlugin::resolve_id`] whether it owns an
//! import specifier and [`TypedEnvPlugin::load`] for the module source. Only
//! `virtual:typed-env` is claimed; it resolves to a `\0`-prefixed id so other
//! plugins never try to read it from disk.
//!
//! The declaration is written before executable generation runs, so a
//! validation failure leaves the previous (or the new) declaration in place.
//! The caller decides whether to abort the build.

use std::io;
use std::path::{Path, PathBuf};

use crate::codegen;
use crate::env::EnvSource;
use crate::error::PluginError;
use crate::schema::Schema;

/// Plugin name reported to the host.
pub const PLUGIN_NAME: &str = "unplugin-typed-env";

/// Import specifier user code imports the validated bindings from.
pub const VIRTUAL_MODULE_ID: &str = "virtual:typed-env";

/// Resolved id for [`VIRTUAL_MODULE_ID`].
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:typed-env";

/// Where the declaration is written unless configured otherwise.
pub const DEFAULT_DTS_PATH: &str = "./typed-env.d.ts";

/// Plugin configuration.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    /// Fields to validate.
    pub schema: Schema,
    /// Declaration output path.
    pub dts: PathBuf,
}

impl PluginOptions {
    /// Options for `schema` with the default declaration path.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            dts: PathBuf::from(DEFAULT_DTS_PATH),
        }
    }

    /// Override the declaration output path.
    pub fn dts(mut self, path: impl Into<PathBuf>) -> Self {
        self.dts = path.into();
        self
    }
}

/// Destination for the generated declaration.
pub trait DeclarationSink {
    /// Persist `source` at `path`, replacing any existing content.
    fn write_declaration(&self, path: &Path, source: &str) -> io::Result<()>;
}

/// Writes declarations to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl DeclarationSink for FsSink {
    fn write_declaration(&self, path: &Path, source: &str) -> io::Result<()> {
        std::fs::write(path, source)
    }
}

/// A configured plugin holding the generated executable module.
#[derive(Debug, Clone)]
pub struct TypedEnvPlugin {
    declaration_path: PathBuf,
    executable: String,
}

impl TypedEnvPlugin {
    /// Run setup against `env`, writing the declaration to disk.
    ///
    /// # Errors
    ///
    /// [`PluginError::WriteDeclaration`] if the declaration cannot be written,
    /// [`PluginError::Generate`] if any field rejects its value.
    pub fn setup(options: PluginOptions, env: &impl EnvSource) -> Result<Self, PluginError> {
        Self::setup_with_sink(options, env, &FsSink)
    }

    /// Run setup against `env`, writing the declaration through `sink`.
    pub fn setup_with_sink(
        options: PluginOptions,
        env: &impl EnvSource,
        sink: &impl DeclarationSink,
    ) -> Result<Self, PluginError> {
        let PluginOptions { schema, dts } = options;

        let declaration = codegen::dts(&schema);
        sink.write_declaration(&dts, &declaration)
            .map_err(|source| PluginError::WriteDeclaration {
                path: dts.clone(),
                source,
            })?;
        tracing::info!(path = %dts.display(), "wrote declaration");

        let executable = codegen::generate_executable(&schema, env)?;

        Ok(Self {
            declaration_path: dts,
            executable,
        })
    }

    /// Plugin name.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Claim the virtual module specifier.
    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        (id == VIRTUAL_MODULE_ID).then_some(RESOLVED_VIRTUAL_MODULE_ID)
    }

    /// Source for the resolved virtual module.
    pub fn load(&self, id: &str) -> Option<&str> {
        (id == RESOLVED_VIRTUAL_MODULE_ID).then_some(self.executable.as_str())
    }

    /// Path the declaration was written to.
    pub fn declaration_path(&self) -> &Path {
        &self.declaration_path
    }

    /// The generated executable module.
    pub fn executable(&self) -> &str {
        &self.executable
    }
}
