//! # Field Builders
//!
//! Constructors for the five built-in field kinds. Each one validates the
//! raw value in kind-specific ways and hands presence handling to
//! [`make_type`] / [`make_parse`].
//!
//! | Kind | Type | Checks | Source |
//! |---|---|---|---|
//! | [`string`] | `string` | min length, max length | `"value"` |
//! | [`url`] | `URL` | min length, max length, URL syntax | `new URL("…")` |
//! | [`number`] | `number` | numeric prefix, min, max | `42` |
//! | [`boolean`] | `boolean` | `"true"` / `"false"` | `true` |
//! | [`enumeration`] | `"a" \| "b"` | membership | `"a"` |
//!
//! ## Bounds Are Exclusive
//!
//! `min_length`, `max_length`, `min` and `max` reject values that are
//! **equal** to the bound: a value passes only when strictly greater than the
//! minimum and strictly less than the maximum. Existing schemas rely on this.

use url::Url;

use crate::error::{FieldError, VariantsError};
use crate::field::{json_source, make_parse, make_parse_json, make_type, Field, FieldOptions};
use crate::float::parse_float;
use crate::literal::{json_quote, number_literal, utf16_len};

/// Options for [`string`] fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringOptions {
    /// Presence rules and default.
    pub presence: FieldOptions<String>,
    /// Values with `length <= min_length` are rejected.
    pub min_length: Option<usize>,
    /// Values with `length >= max_length` are rejected.
    pub max_length: Option<usize>,
}

impl StringOptions {
    /// Required string with no length limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the variable to be unset.
    pub fn optional(mut self) -> Self {
        self.presence = FieldOptions::optional();
        self
    }

    /// Allow the variable to be unset, falling back to `value`.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.presence = FieldOptions::with_default(value);
        self
    }

    /// Set the exclusive lower length bound.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the exclusive upper length bound.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Options for [`url`] fields. Length bounds apply to the raw string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlOptions {
    /// Presence rules and default.
    pub presence: FieldOptions<Url>,
    /// Values with `length <= min_length` are rejected.
    pub min_length: Option<usize>,
    /// Values with `length >= max_length` are rejected.
    pub max_length: Option<usize>,
}

impl UrlOptions {
    /// Required URL with no length limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the variable to be unset.
    pub fn optional(mut self) -> Self {
        self.presence = FieldOptions::optional();
        self
    }

    /// Allow the variable to be unset, falling back to `value`.
    pub fn with_default(mut self, value: Url) -> Self {
        self.presence = FieldOptions::with_default(value);
        self
    }

    /// Set the exclusive lower length bound.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the exclusive upper length bound.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Options for [`number`] fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberOptions {
    /// Presence rules and default.
    pub presence: FieldOptions<f64>,
    /// Values `<= min` are rejected.
    pub min: Option<f64>,
    /// Values `>= max` are rejected.
    pub max: Option<f64>,
}

impl NumberOptions {
    /// Required number with no range limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the variable to be unset.
    pub fn optional(mut self) -> Self {
        self.presence = FieldOptions::optional();
        self
    }

    /// Allow the variable to be unset, falling back to `value`.
    pub fn with_default(mut self, value: f64) -> Self {
        self.presence = FieldOptions::with_default(value);
        self
    }

    /// Set the exclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the exclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Non-empty, ordered list of enum variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variants(Vec<String>);

impl Variants {
    /// Build a variant list from its first entry and the rest.
    pub fn new(first: impl Into<String>, rest: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut variants = vec![first.into()];
        variants.extend(rest.into_iter().map(Into::into));
        Self(variants)
    }

    /// Variants in declaration order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether `value` is one of the variants, by exact string equality.
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// The union of quoted variants: `"a" | "b"`.
    pub fn type_union(&self) -> String {
        self.0
            .iter()
            .map(|v| json_quote(v))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl TryFrom<Vec<String>> for Variants {
    type Error = VariantsError;

    fn try_from(variants: Vec<String>) -> Result<Self, Self::Error> {
        if variants.is_empty() {
            Err(VariantsError::Empty)
        } else {
            Ok(Self(variants))
        }
    }
}

fn check_length(
    raw: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<(), FieldError> {
    let actual = utf16_len(raw);
    if let Some(min) = min_length {
        if actual <= min {
            return Err(FieldError::MinLength { min, actual });
        }
    }
    if let Some(max) = max_length {
        if actual >= max {
            return Err(FieldError::MaxLength { max, actual });
        }
    }
    Ok(())
}

/// A string field. Serialized as a JSON string literal.
pub fn string(options: StringOptions) -> Field {
    let StringOptions {
        presence,
        min_length,
        max_length,
    } = options;

    let ty = make_type("string", &presence);
    let parse = make_parse_json(presence, move |raw: &str| {
        check_length(raw, min_length, max_length)?;
        Ok(raw.to_string())
    });
    Field::new(ty, parse)
}

/// An absolute URL field. Serialized as `new URL("<normalized>")`.
///
/// The normalized form is what the URL parser produces, which may differ
/// from the input: `https://example.org` becomes `https://example.org/`.
pub fn url(options: UrlOptions) -> Field {
    let UrlOptions {
        presence,
        min_length,
        max_length,
    } = options;

    let ty = make_type("URL", &presence);
    let parse = make_parse(
        presence,
        move |raw: &str| {
            check_length(raw, min_length, max_length)?;
            Url::parse(raw).map_err(FieldError::InvalidUrl)
        },
        |value: &Url| Ok(format!("new URL({})", json_quote(value.as_str()))),
    );
    Field::new(ty, parse)
}

/// A number field, parsed leniently from the leading numeric prefix.
pub fn number(options: NumberOptions) -> Field {
    let NumberOptions { presence, min, max } = options;

    let ty = make_type("number", &presence);
    let parse = make_parse(
        presence,
        move |raw: &str| {
            let value = parse_float(raw).ok_or(FieldError::InvalidNumber)?;
            if let Some(min) = min {
                if value <= min {
                    return Err(FieldError::MinValue { min, actual: value });
                }
            }
            if let Some(max) = max {
                if value >= max {
                    return Err(FieldError::MaxValue { max, actual: value });
                }
            }
            Ok(value)
        },
        |value: &f64| Ok(number_literal(*value)),
    );
    Field::new(ty, parse)
}

/// A boolean field. Only the exact tokens `true` and `false` are accepted.
pub fn boolean(presence: FieldOptions<bool>) -> Field {
    let ty = make_type("boolean", &presence);
    let parse = make_parse(
        presence,
        |raw: &str| match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(FieldError::InvalidBoolean {
                got: other.to_string(),
            }),
        },
        json_source,
    );
    Field::new(ty, parse)
}

/// A string enum field.
///
/// The declared type is the union of the quoted variants in declaration
/// order. A default is not checked against the variants here; schema files
/// are checked at load time.
pub fn enumeration(variants: Variants, presence: FieldOptions<String>) -> Field {
    let ty = make_type(&variants.type_union(), &presence);
    let parse = make_parse_json(presence, move |raw: &str| {
        if variants.contains(raw) {
            Ok(raw.to_string())
        } else {
            Err(FieldError::InvalidEnum {
                expected: variants.as_slice().to_vec(),
                got: raw.to_string(),
            })
        }
    });
    Field::new(ty, parse)
}
