//! # Code Generation
//!
//! Turns a [`Schema`] into the two artifacts consumed by the build:
//!
//! - **Declaration** ([`dts`]) — a TypeScript ambient module declaring one
//!   exported `const` per key, typed by the field's `ty`. Pure; never fails
//!   and never reads the environment.
//! - **Executable** ([`js`] / [`generate_executable`]) — an ES module
//!   exporting one `const` per key, initialized to the source returned by the
//!   field's parser for the corresponding environment value.
//!
//! ## Failure Policy
//!
//! Executable generation is fail-fast: the first field that rejects its
//! value aborts the pass with [`GenerateError::Field`], and no partial
//! output is returned. Keys are visited in schema iteration order.
//!
//! ## Determinism
//!
//! Both outputs are produced fresh on every call. The same schema and the
//! same environment snapshot always produce byte-identical text.

use typed_env_core::literal::json_quote;

use crate::env::{EnvSource, ProcessEnv};
use crate::error::GenerateError;
use crate::plugin::VIRTUAL_MODULE_ID;
use crate::schema::Schema;

/// First line of every generated artifact.
pub const GENERATED_BANNER: &str = "// Generated by typed-env. Do not edit.";

/// Generate the TypeScript declaration for `schema`.
///
/// ```text
/// // Generated by typed-env. Do not edit.
/// declare module "virtual:typed-env" {
///   export const PORT: number;
/// }
/// ```
pub fn dts(schema: &Schema) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push('\n');
    out.push_str(&format!("declare module {} {{\n", json_quote(VIRTUAL_MODULE_ID)));
    for (key, field) in schema.iter() {
        out.push_str(&format!("  export const {key}: {};\n", field.ty()));
    }
    out.push_str("}\n");

    tracing::debug!(fields = schema.len(), bytes = out.len(), "generated declaration");
    out
}

/// Alias for [`dts`].
pub fn generate_declaration(schema: &Schema) -> String {
    dts(schema)
}

/// Generate the executable module for `schema` from the live process
/// environment.
///
/// # Errors
///
/// Returns [`GenerateError::Field`] for the first key whose field rejects
/// its environment value.
pub fn js(schema: &Schema) -> Result<String, GenerateError> {
    generate_executable(schema, &ProcessEnv)
}

/// Generate the executable module for `schema` from `env`.
///
/// ```text
/// // Generated by typed-env. Do not edit.
/// export const PORT = 8080;
/// ```
///
/// An empty schema yields the banner and `export {};`.
///
/// # Errors
///
/// Returns [`GenerateError::Field`] for the first key whose field rejects
/// its environment value.
pub fn generate_executable(
    schema: &Schema,
    env: &impl EnvSource,
) -> Result<String, GenerateError> {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push('\n');

    if schema.is_empty() {
        out.push_str("export {};\n");
    }

    for (key, field) in schema.iter() {
        let raw = env.var(key);
        tracing::trace!(key, present = raw.is_some(), "reading environment variable");

        let src = field
            .parse(raw.as_deref())
            .map_err(|source| GenerateError::Field {
                key: key.to_string(),
                source,
            })?;
        out.push_str(&format!("export const {key} = {src};\n"));
    }

    tracing::debug!(fields = schema.len(), bytes = out.len(), "generated executable module");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use typed_env_core::env_field::{self, NumberOptions, StringOptions};
    use typed_env_core::{Field, FieldError, FieldOptions};

    use crate::env::EnvSnapshot;

    fn stub(ty: &str, src: &'static str) -> Field {
        Field::new(ty, move |_raw| Ok(src.to_string()))
    }

    #[test]
    fn test_dts_empty_schema() {
        assert_eq!(
            dts(&Schema::new()),
            "// Generated by typed-env. Do not edit.\n\
             declare module \"virtual:typed-env\" {\n\
             }\n"
        );
    }

    #[test]
    fn test_dts_with_fields() {
        let schema = Schema::new()
            .with("FIELD_NAME_1", stub("fieldType | fieldOtherType", ""))
            .unwrap()
            .with("FIELD_NAME_2", stub("string", ""))
            .unwrap();
        assert_eq!(
            dts(&schema),
            "// Generated by typed-env. Do not edit.\n\
             declare module \"virtual:typed-env\" {\n\
             \x20 export const FIELD_NAME_1: fieldType | fieldOtherType;\n\
             \x20 export const FIELD_NAME_2: string;\n\
             }\n"
        );
    }

    #[test]
    fn test_dts_does_not_parse_fields() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let field = Field::new("string", move |_raw| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(FieldError::Required)
        });
        let schema = Schema::new().with("A", field).unwrap();
        let out = dts(&schema);
        assert!(out.contains("export const A: string;"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_js_empty_schema() {
        let out = generate_executable(&Schema::new(), &EnvSnapshot::default()).unwrap();
        assert_eq!(out, "// Generated by typed-env. Do not edit.\nexport {};\n");
    }

    #[test]
    fn test_js_with_fields() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = |name: &'static str, src: &'static str| {
            let seen = seen.clone();
            Field::new("", move |raw| {
                seen.lock().unwrap().push((name, raw.map(str::to_string)));
                Ok(src.to_string())
            })
        };
        let schema = Schema::new()
            .with("FIELD_NAME_1", recorder("1", "parsedValue1"))
            .unwrap()
            .with("FIELD_NAME_2", recorder("2", "parsedValue2"))
            .unwrap();
        let env: EnvSnapshot = [("FIELD_NAME_1", "value1"), ("FIELD_NAME_2", "value2")]
            .into_iter()
            .collect();

        let out = generate_executable(&schema, &env).unwrap();
        assert_eq!(
            out,
            "// Generated by typed-env. Do not edit.\n\
             export const FIELD_NAME_1 = parsedValue1;\n\
             export const FIELD_NAME_2 = parsedValue2;\n"
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("1", Some("value1".to_string())),
                ("2", Some("value2".to_string())),
            ]
        );
    }

    #[test]
    fn test_js_passes_absence_to_parser() {
        let schema = Schema::new()
            .with("MISSING", env_field::string(StringOptions::new().optional()))
            .unwrap();
        let out = generate_executable(&schema, &EnvSnapshot::default()).unwrap();
        assert!(out.contains("export const MISSING = undefined;\n"));
    }

    #[test]
    fn test_js_wraps_field_failure_with_key() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let field = Field::new("", move |raw| {
            recorded.lock().unwrap().push(raw.map(str::to_string));
            Err(FieldError::Required)
        });
        let schema = Schema::new().with("FIELD_NAME_1", field).unwrap();
        let env: EnvSnapshot = [("FIELD_NAME_1", "value")].into_iter().collect();

        let err = generate_executable(&schema, &env).unwrap_err();
        assert_eq!(err.to_string(), r#"Error while parsing field "FIELD_NAME_1""#);
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("Required"));
        assert_eq!(*calls.lock().unwrap(), vec![Some("value".to_string())]);
    }

    #[test]
    fn test_js_stops_at_first_failure() {
        let later = Arc::new(AtomicUsize::new(0));
        let counter = later.clone();
        let schema = Schema::new()
            .with("A_PORT", env_field::number(NumberOptions::new()))
            .unwrap()
            .with(
                "B_AFTER",
                Field::new("string", move |_raw| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok("\"x\"".to_string())
                }),
            )
            .unwrap();
        let env: EnvSnapshot = [("A_PORT", "not-a-number")].into_iter().collect();

        let err = generate_executable(&schema, &env).unwrap_err();
        assert_eq!(err.key(), "A_PORT");
        assert!(matches!(err.field_error(), FieldError::InvalidNumber));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_js_with_builders() {
        let schema = Schema::new()
            .with("DEBUG", env_field::boolean(FieldOptions::with_default(false)))
            .unwrap()
            .with("NAME", env_field::string(StringOptions::new()))
            .unwrap()
            .with("PORT", env_field::number(NumberOptions::new().min(0.0)))
            .unwrap();
        let env: EnvSnapshot = [("NAME", "svc"), ("PORT", "8080")].into_iter().collect();

        let out = generate_executable(&schema, &env).unwrap();
        assert_eq!(
            out,
            "// Generated by typed-env. Do not edit.\n\
             export const DEBUG = false;\n\
             export const NAME = \"svc\";\n\
             export const PORT = 8080;\n"
        );
    }

    #[test]
    fn test_generate_declaration_alias() {
        let schema = Schema::new().with("X", stub("number", "1")).unwrap();
        assert_eq!(generate_declaration(&schema), dts(&schema));
    }
}
