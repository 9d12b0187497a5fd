//! # Error Types — Field Validation Failures
//!
//! Every way a single environment variable can be rejected. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Message Compatibility
//!
//! The `Display` output of [`FieldError`] is part of the public contract:
//! build pipelines match on strings like `Min length 1, got 0` and
//! `Invalid number`. Lengths are reported in UTF-16 code units and numbers
//! in shortest round-trip decimal form, so `1` renders as `1`, not `1.0`.

use thiserror::Error;

use crate::literal::{json_list, json_quote, number_literal};

/// Why a raw environment value was rejected by a field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// A required variable is not set.
    #[error("Required")]
    Required,

    /// The value is too short. Rejected when `actual <= min`.
    #[error("Min length {min}, got {actual}")]
    MinLength {
        /// Configured minimum.
        min: usize,
        /// Measured length in UTF-16 code units.
        actual: usize,
    },

    /// The value is too long. Rejected when `actual >= max`.
    #[error("Max length {max}, got {actual}")]
    MaxLength {
        /// Configured maximum.
        max: usize,
        /// Measured length in UTF-16 code units.
        actual: usize,
    },

    /// The value is not an absolute URL.
    #[error("Invalid URL")]
    InvalidUrl(#[source] url::ParseError),

    /// No numeric prefix could be read from the value.
    #[error("Invalid number")]
    InvalidNumber,

    /// The number is too small. Rejected when `actual <= min`.
    #[error("Min value {}, got {}", display_number(.min), display_number(.actual))]
    MinValue {
        /// Configured minimum.
        min: f64,
        /// Parsed value.
        actual: f64,
    },

    /// The number is too large. Rejected when `actual >= max`.
    #[error("Max value {}, got {}", display_number(.max), display_number(.actual))]
    MaxValue {
        /// Configured maximum.
        max: f64,
        /// Parsed value.
        actual: f64,
    },

    /// The value is neither `"true"` nor `"false"`.
    #[error("Invalid boolean, expected \"true\" or \"false\", got {}", json_quote(.got))]
    InvalidBoolean {
        /// The offending raw value.
        got: String,
    },

    /// The value is not one of the declared variants.
    #[error("Invalid enum value, expected one of {}, got {}", json_list(.expected), json_quote(.got))]
    InvalidEnum {
        /// Declared variants, in declaration order.
        expected: Vec<String>,
        /// The offending raw value.
        got: String,
    },

    /// Failure raised by a user-defined field.
    #[error("{0}")]
    Custom(String),

    /// A validated value could not be serialized to a literal.
    #[error("cannot serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FieldError {
    /// Build a [`FieldError::Custom`] from any message.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Error constructing an enum variant list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantsError {
    /// An enum field needs at least one variant.
    #[error("enum field requires at least one variant")]
    Empty,
}

fn display_number(value: &f64) -> String {
    number_literal(*value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message() {
        assert_eq!(FieldError::Required.to_string(), "Required");
    }

    #[test]
    fn test_length_messages() {
        let min = FieldError::MinLength { min: 1, actual: 0 };
        assert_eq!(min.to_string(), "Min length 1, got 0");

        let max = FieldError::MaxLength { max: 0, actual: 1 };
        assert_eq!(max.to_string(), "Max length 0, got 1");
    }

    #[test]
    fn test_value_messages_render_integers_without_fraction() {
        let min = FieldError::MinValue { min: 1.0, actual: 0.0 };
        assert_eq!(min.to_string(), "Min value 1, got 0");

        let max = FieldError::MaxValue { max: 0.5, actual: 1.25 };
        assert_eq!(max.to_string(), "Max value 0.5, got 1.25");
    }

    #[test]
    fn test_boolean_message_quotes_value() {
        let err = FieldError::InvalidBoolean { got: "yes".into() };
        assert_eq!(
            err.to_string(),
            r#"Invalid boolean, expected "true" or "false", got "yes""#
        );
    }

    #[test]
    fn test_enum_message_lists_variants() {
        let err = FieldError::InvalidEnum {
            expected: vec!["value1".into(), "value2".into()],
            got: "value3".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"Invalid enum value, expected one of ["value1","value2"], got "value3""#
        );
    }

    #[test]
    fn test_invalid_url_keeps_parse_error_as_source() {
        let err = FieldError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase);
        assert_eq!(err.to_string(), "Invalid URL");
        assert!(std::error::Error::source(&err).is_some());
    }
}
