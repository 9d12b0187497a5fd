#![deny(missing_docs)]

//! # typed-env-core — Field Contracts
//!
//! The leaf crate of typed-env. It defines what a schema entry is and how
//! each built-in kind validates a raw environment value and turns it into
//! JavaScript source.
//!
//! ## Key Design Principles
//!
//! 1. **One shape for every kind.** A [`Field`] is a type string plus a parse
//!    closure. The five builders in [`env_field`] are plain functions that
//!    return a `Field`; there is no trait hierarchy.
//!
//! 2. **Presence is decided once.** [`make_type`] and [`make_parse`] hold the
//!    required / optional / default decision tree. Builders only supply the
//!    kind-specific `raw -> value` and `value -> source` steps.
//!
//! 3. **Errors are values.** Every rejection is a [`FieldError`] variant whose
//!    `Display` text is stable and matched on by callers.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `typed-env-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod env_field;
pub mod error;
pub mod field;
pub mod float;
pub mod literal;

pub use env_field::{NumberOptions, StringOptions, UrlOptions, Variants};
pub use error::{FieldError, VariantsError};
pub use field::{
    json_source, make_parse, make_parse_json, make_type, Field, FieldOptions, ABSENT_TOKEN,
    ABSENT_TYPE_SUFFIX,
};
pub use url::Url;
