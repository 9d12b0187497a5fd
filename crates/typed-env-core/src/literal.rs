//! # JavaScript Literal Helpers
//!
//! Small helpers that turn validated Rust values into JavaScript source
//! fragments. Strings go through `serde_json`, whose escaping is a subset of
//! what a JS string literal accepts. Numbers follow `Number.prototype.toString`:
//! shortest round-trip digits, exponent form outside `[1e-6, 1e21)`.

use serde_json::Value;

/// JSON-quote a string: `value` becomes `"value"`.
pub fn json_quote(value: &str) -> String {
    Value::from(value).to_string()
}

/// Compact JSON array of strings: `["a","b"]`.
pub fn json_list(values: &[String]) -> String {
    Value::from(values.to_vec()).to_string()
}

/// Render an `f64` as a JavaScript numeric literal.
///
/// Infinities become `Infinity` / `-Infinity`, which are valid in expression
/// position. NaN never reaches this function from a field parser, but is
/// rendered as `NaN` for completeness. Negative zero renders as `0`.
pub fn number_literal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        // `{:e}` yields `1e21` / `1.5e-7`; JS writes `1e+21`.
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }

    format!("{value}")
}

/// Length of a string in UTF-16 code units, the unit JS `String.length` uses.
pub fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}
