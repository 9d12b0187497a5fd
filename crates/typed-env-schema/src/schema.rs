//! # Schema
//!
//! Maps environment variable names to [`Field`]s. Keys become exported
//! JavaScript bindings verbatim, so they must be plain identifiers.
//!
//! Iteration order is sorted key order. Both generators walk the schema in
//! this order, which keeps generated output byte-stable across runs.

use std::collections::BTreeMap;

use typed_env_core::Field;

use crate::error::SchemaError;

/// Environment variable name → field contract.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, Field>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from `(key, field)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid or repeated key.
    pub fn try_from_fields<I, K>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        let mut schema = Self::new();
        for (key, field) in fields {
            schema.insert(key, field)?;
        }
        Ok(schema)
    }

    /// Add a field.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidKey`] if `key` is not an identifier and
    /// [`SchemaError::DuplicateKey`] if it is already present.
    pub fn insert(&mut self, key: impl Into<String>, field: Field) -> Result<(), SchemaError> {
        let key = key.into();
        if !is_identifier(&key) {
            return Err(SchemaError::InvalidKey { key });
        }
        if self.fields.contains_key(&key) {
            return Err(SchemaError::DuplicateKey { key });
        }
        self.fields.insert(key, field);
        Ok(())
    }

    /// Builder form of [`Schema::insert`].
    pub fn with(mut self, key: impl Into<String>, field: Field) -> Result<Self, SchemaError> {
        self.insert(key, field)?;
        Ok(self)
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Fields in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Words that cannot name a `const` binding in an ES module: reserved
/// words, strict-mode reserved words, literals, and `await`.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `key` can be exported as a module binding: an ASCII JavaScript
/// identifier (`[A-Za-z_$][A-Za-z0-9_$]*`) that is not a reserved word.
pub fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&key)
}
