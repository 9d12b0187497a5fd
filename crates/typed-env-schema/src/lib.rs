//! # typed-env-schema — Schemas & Code Generation
//!
//! Turns a schema of environment variables into the two artifacts a build
//! consumes, and wires them into a host build tool as the
//! `virtual:typed-env` module.
//!
//! ## Generators (`codegen`)
//!
//! - [`dts`] — TypeScript declaration for the module. Pure.
//! - [`js`] / [`generate_executable`] — ES module whose bindings are the
//!   validated values. Fail-fast on the first invalid variable.
//!
//! ## Schema Files (`file`)
//!
//! [`SchemaFile`] reads YAML or JSON field specs and builds a [`Schema`]
//! with the builders from `typed-env-core`.
//!
//! ## Plugin (`plugin`)
//!
//! [`TypedEnvPlugin`] runs both generators once at setup, writes the
//! declaration, and answers `resolve_id` / `load` for the virtual module.
//!
//! ## Crate Policy
//!
//! - Depends only on `typed-env-core` internally.
//! - Generation never mutates the environment and keeps no state between
//!   calls.
//! - Field failures surface as [`GenerateError`] with the field error kept
//!   as `source()`.

pub mod codegen;
pub mod env;
pub mod error;
pub mod file;
pub mod plugin;
pub mod schema;

pub use codegen::{dts, generate_declaration, generate_executable, js, GENERATED_BANNER};
pub use env::{EnvSnapshot, EnvSource, ProcessEnv};
pub use error::{GenerateError, PluginError, SchemaError};
pub use file::{load_schema, FieldSpec, SchemaFile};
pub use plugin::{
    DeclarationSink, FsSink, PluginOptions, TypedEnvPlugin, DEFAULT_DTS_PATH, PLUGIN_NAME,
    RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID,
};
pub use schema::{is_identifier, Schema};
