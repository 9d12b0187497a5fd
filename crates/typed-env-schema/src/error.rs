//! # Error Types — Schema, Generation, and Plugin Failures
//!
//! Field-level failures ([`FieldError`]) are never flattened into strings:
//! [`GenerateError::Field`] names the offending variable and keeps the field
//! error reachable through `std::error::Error::source`.

use std::path::PathBuf;

use thiserror::Error;
use typed_env_core::{FieldError, VariantsError};

/// Executable generation failed for one schema key.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The field for `key` rejected its environment value.
    #[error("Error while parsing field \"{key}\"")]
    Field {
        /// Schema key (environment variable name).
        key: String,
        /// The validation failure reported by the field.
        #[source]
        source: FieldError,
    },
}

impl GenerateError {
    /// The schema key whose field failed.
    pub fn key(&self) -> &str {
        match self {
            Self::Field { key, .. } => key,
        }
    }

    /// The underlying field failure.
    pub fn field_error(&self) -> &FieldError {
        match self {
            Self::Field { source, .. } => source,
        }
    }
}

/// A schema could not be built or loaded.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Key is not usable as a JavaScript binding name.
    #[error("invalid schema key {key:?}: expected a non-reserved identifier matching [A-Za-z_$][A-Za-z0-9_$]*")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// Key was inserted twice.
    #[error("duplicate schema key \"{key}\"")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },

    /// A required field declared a default.
    #[error("field \"{key}\": a default requires `optional: true`")]
    DefaultOnRequired {
        /// Offending field.
        key: String,
    },

    /// An enum field declared no variants.
    #[error("field \"{key}\": invalid enum variants")]
    EmptyEnum {
        /// Offending field.
        key: String,
        /// Why the variant list was rejected.
        #[source]
        source: VariantsError,
    },

    /// A declared default is not a valid value for its field.
    #[error("field \"{key}\": invalid default")]
    InvalidDefault {
        /// Offending field.
        key: String,
        /// Why the default was rejected.
        #[source]
        source: FieldError,
    },

    /// The schema file is not valid YAML/JSON for the schema format.
    #[error("schema parse error for '{path}': {reason}")]
    Parse {
        /// Schema file path, or `<inline>` for in-memory sources.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The schema file could not be read.
    #[error("cannot read schema file '{}'", .path.display())]
    Io {
        /// Schema file path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}

/// Plugin setup failed.
#[derive(Error, Debug)]
pub enum PluginError {
    /// The executable module could not be generated.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The declaration file could not be written.
    #[error("cannot write declaration file '{}'", .path.display())]
    WriteDeclaration {
        /// Target declaration path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
