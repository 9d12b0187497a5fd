//! # Schema Files
//!
//! Declarative YAML or JSON description of a [`Schema`], so the CLI can
//! build one without Rust code:
//!
//! ```yaml
//! fields:
//!   API_URL: { kind: url, min_length: 10 }
//!   PORT:    { kind: number, optional: true, default: 8080, min: 0, max: 65536 }
//!   DEBUG:   { kind: boolean, optional: true, default: false }
//!   MODE:    { kind: enum, variants: [dev, prod] }
//! ```
//!
//! ## Load-Time Checks
//!
//! - Keys must be identifiers.
//! - A `default` requires `optional: true`.
//! - Enum fields need at least one variant, and an enum default must be one
//!   of them.
//! - A URL default must parse as an absolute URL.
//!
//! Unknown keys in a field spec are rejected so that typos such as
//! `minLength` fail loudly instead of silently dropping a constraint.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use typed_env_core::env_field::{self, NumberOptions, StringOptions, UrlOptions, Variants};
use typed_env_core::{Field, FieldError, FieldOptions, Url};

use crate::error::SchemaError;
use crate::schema::Schema;

/// Top-level schema file document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Environment variable name → field spec.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSpec>,
}

/// One field, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum FieldSpec {
    /// See [`env_field::string`].
    String {
        #[serde(default)]
        optional: bool,
        default: Option<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// See [`env_field::url`].
    Url {
        #[serde(default)]
        optional: bool,
        default: Option<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// See [`env_field::number`].
    Number {
        #[serde(default)]
        optional: bool,
        default: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// See [`env_field::boolean`].
    Boolean {
        #[serde(default)]
        optional: bool,
        default: Option<bool>,
    },
    /// See [`env_field::enumeration`].
    Enum {
        variants: Vec<String>,
        #[serde(default)]
        optional: bool,
        default: Option<String>,
    },
}

impl FieldSpec {
    /// Build the field contract described by this spec.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming `key` when the spec is inconsistent.
    pub fn build(self, key: &str) -> Result<Field, SchemaError> {
        let field = match self {
            Self::String {
                optional,
                default,
                min_length,
                max_length,
            } => env_field::string(StringOptions {
                presence: presence(key, optional, default)?,
                min_length,
                max_length,
            }),
            Self::Url {
                optional,
                default,
                min_length,
                max_length,
            } => {
                let default = default
                    .map(|raw| Url::parse(&raw))
                    .transpose()
                    .map_err(|e| SchemaError::InvalidDefault {
                        key: key.to_string(),
                        source: FieldError::InvalidUrl(e),
                    })?;
                env_field::url(UrlOptions {
                    presence: presence(key, optional, default)?,
                    min_length,
                    max_length,
                })
            }
            Self::Number {
                optional,
                default,
                min,
                max,
            } => env_field::number(NumberOptions {
                presence: presence(key, optional, default)?,
                min,
                max,
            }),
            Self::Boolean { optional, default } => {
                env_field::boolean(presence(key, optional, default)?)
            }
            Self::Enum {
                variants,
                optional,
                default,
            } => {
                let variants =
                    Variants::try_from(variants).map_err(|source| SchemaError::EmptyEnum {
                        key: key.to_string(),
                        source,
                    })?;
                if let Some(value) = default.as_deref().filter(|v| !variants.contains(v)) {
                    return Err(SchemaError::InvalidDefault {
                        key: key.to_string(),
                        source: FieldError::InvalidEnum {
                            expected: variants.as_slice().to_vec(),
                            got: value.to_string(),
                        },
                    });
                }
                env_field::enumeration(variants, presence(key, optional, default)?)
            }
        };
        Ok(field)
    }
}

fn presence<T>(key: &str, optional: bool, default: Option<T>) -> Result<FieldOptions<T>, SchemaError> {
    match (optional, default) {
        (false, Some(_)) => Err(SchemaError::DefaultOnRequired {
            key: key.to_string(),
        }),
        (false, None) => Ok(FieldOptions::Required),
        (true, default) => Ok(FieldOptions::Optional { default }),
    }
}

impl SchemaFile {
    /// Parse a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(source).map_err(|e| SchemaError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(source).map_err(|e| SchemaError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Read a schema file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the file cannot be read and
    /// [`SchemaError::Parse`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };

        parsed.map_err(|e| match e {
            SchemaError::Parse { reason, .. } => SchemaError::Parse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Build the [`Schema`] this file describes.
    ///
    /// # Errors
    ///
    /// Fails on the first field (in key order) with an invalid key or spec.
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut schema = Schema::new();
        for (key, spec) in self.fields {
            let field = spec.build(&key)?;
            schema.insert(key, field)?;
        }
        tracing::debug!(fields = schema.len(), "loaded schema");
        Ok(schema)
    }
}

/// Read a schema file and build its [`Schema`].
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    SchemaFile::from_path(path)?.into_schema()
}
