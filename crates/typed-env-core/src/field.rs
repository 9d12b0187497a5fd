//! # Field Contract & Option Composer
//!
//! A [`Field`] pairs a TypeScript type string with a parse function that
//! turns a raw environment value into JavaScript source. Every field kind
//! shares this one shape; the builders in [`crate::env_field`] differ only in
//! the closures they capture.
//!
//! ## Invariant
//!
//! `ty` and `parse` agree: `parse` returns [`ABSENT_TOKEN`] only when `ty`
//! admits `undefined`. [`make_type`] and [`make_parse`] encode the same
//! decision from the same [`FieldOptions`], so builders that use both keep
//! the invariant by construction.
//!
//! ## Resolution Order
//!
//! A present raw value is always validated, even when a default exists.
//! Defaults only apply to an entirely absent variable.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::FieldError;

/// Source fragment emitted for an optional field with no value and no default.
pub const ABSENT_TOKEN: &str = "undefined";

/// Type suffix appended when a field may be absent.
pub const ABSENT_TYPE_SUFFIX: &str = " | undefined";

type ParseFn = dyn Fn(Option<&str>) -> Result<String, FieldError> + Send + Sync;

/// One schema entry: a declared type and a validating parse function.
#[derive(Clone)]
pub struct Field {
    ty: String,
    parse: Arc<ParseFn>,
}

impl Field {
    /// Build a field from a type string and a parse function.
    ///
    /// The caller is responsible for keeping `ty` and `parse` in agreement.
    pub fn new<F>(ty: impl Into<String>, parse: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<String, FieldError> + Send + Sync + 'static,
    {
        Self {
            ty: ty.into(),
            parse: Arc::new(parse),
        }
    }

    /// TypeScript type of the validated value.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Validate `raw` and return the JavaScript source for its value.
    pub fn parse(&self, raw: Option<&str>) -> Result<String, FieldError> {
        (self.parse)(raw)
    }

    /// Whether the declared type admits `undefined`.
    pub fn is_optional_type(&self) -> bool {
        self.ty.ends_with(ABSENT_TYPE_SUFFIX)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// Presence rules shared by every field kind.
///
/// A required field can never carry a default; only the optional shape may.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOptions<T> {
    /// The variable must be set.
    Required,
    /// The variable may be unset; `default` is used in its place if given.
    Optional {
        /// Value substituted when the variable is unset.
        default: Option<T>,
    },
}

impl<T> Default for FieldOptions<T> {
    fn default() -> Self {
        Self::Required
    }
}

impl<T> FieldOptions<T> {
    /// The variable must be set.
    pub fn required() -> Self {
        Self::Required
    }

    /// The variable may be unset and has no default.
    pub fn optional() -> Self {
        Self::Optional { default: None }
    }

    /// The variable may be unset and falls back to `value`.
    pub fn with_default(value: impl Into<T>) -> Self {
        Self::Optional {
            default: Some(value.into()),
        }
    }

    /// Whether the variable may be unset.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional { .. })
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<&T> {
        match self {
            Self::Optional { default } => default.as_ref(),
            Self::Required => None,
        }
    }

    /// Whether the parsed value can be absent: optional without a default.
    ///
    /// Defaults are recognised by presence, so `false`, `0` and `""` still
    /// count as configured defaults.
    pub fn admits_absent(&self) -> bool {
        matches!(self, Self::Optional { default: None })
    }
}

/// Compose the declared type for a field from its base type and options.
///
/// ```
/// use typed_env_core::{make_type, FieldOptions};
///
/// assert_eq!(make_type("string", &FieldOptions::<String>::required()), "string");
/// assert_eq!(make_type("number", &FieldOptions::<f64>::optional()), "number | undefined");
/// assert_eq!(make_type("boolean", &FieldOptions::<bool>::with_default(false)), "boolean");
/// ```
pub fn make_type<T>(base_type: &str, options: &FieldOptions<T>) -> String {
    if options.admits_absent() {
        format!("{base_type}{ABSENT_TYPE_SUFFIX}")
    } else {
        base_type.to_string()
    }
}

/// Compose a parse function from a value parser and a source serializer.
///
/// Resolution order:
///
/// 1. present raw value: `raw_to_value`, then `value_to_src`; failures
///    propagate unchanged.
/// 2. absent, required: [`FieldError::Required`]; neither function runs.
/// 3. absent, optional, no default: [`ABSENT_TOKEN`]; neither function runs.
/// 4. absent, optional, default: `value_to_src` on the default.
pub fn make_parse<T, R, S>(
    options: FieldOptions<T>,
    raw_to_value: R,
    value_to_src: S,
) -> impl Fn(Option<&str>) -> Result<String, FieldError> + Send + Sync + 'static
where
    T: Send + Sync + 'static,
    R: Fn(&str) -> Result<T, FieldError> + Send + Sync + 'static,
    S: Fn(&T) -> Result<String, FieldError> + Send + Sync + 'static,
{
    move |raw: Option<&str>| match raw {
        Some(raw) => {
            let value = raw_to_value(raw)?;
            value_to_src(&value)
        }
        None => match &options {
            FieldOptions::Required => Err(FieldError::Required),
            FieldOptions::Optional { default: None } => Ok(ABSENT_TOKEN.to_string()),
            FieldOptions::Optional {
                default: Some(default),
            } => value_to_src(default),
        },
    }
}

/// [`make_parse`] with the generic literal serializer: the value's JSON form.
pub fn make_parse_json<T, R>(
    options: FieldOptions<T>,
    raw_to_value: R,
) -> impl Fn(Option<&str>) -> Result<String, FieldError> + Send + Sync + 'static
where
    T: Serialize + Send + Sync + 'static,
    R: Fn(&str) -> Result<T, FieldError> + Send + Sync + 'static,
{
    make_parse(options, raw_to_value, json_source)
}

/// Serialize a value as a JSON literal, which is also valid JavaScript.
pub fn json_source<T: Serialize>(value: &T) -> Result<String, FieldError> {
    Ok(serde_json::to_string(value)?)
}
