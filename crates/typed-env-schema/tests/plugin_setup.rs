//! Integration test: plugin setup writing the declaration to a real
//! directory and serving the virtual module.

use typed_env_schema::{
    dts, load_schema, EnvSnapshot, PluginError, PluginOptions, TypedEnvPlugin,
    RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID,
};

fn schema_path() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/typed-env.yaml")
}

#[test]
fn test_setup_writes_declaration_file() {
    let dir = tempfile::tempdir().unwrap();
    let dts_path = dir.path().join("typed-env.d.ts");
    let schema = load_schema(schema_path()).unwrap();
    let expected_dts = dts(&schema);

    let env: EnvSnapshot = [("API_URL", "https://example.org"), ("APP_NAME", "svc")]
        .into_iter()
        .collect();
    let plugin = TypedEnvPlugin::setup(PluginOptions::new(schema).dts(&dts_path), &env).unwrap();

    let written = std::fs::read_to_string(&dts_path).unwrap();
    assert_eq!(written, expected_dts);

    assert_eq!(plugin.resolve_id(VIRTUAL_MODULE_ID), Some(RESOLVED_VIRTUAL_MODULE_ID));
    let source = plugin.load(RESOLVED_VIRTUAL_MODULE_ID).unwrap();
    assert!(source.contains("export const API_URL = new URL(\"https://example.org/\");\n"));
    assert!(source.contains("export const APP_NAME = \"svc\";\n"));
}

#[test]
fn test_setup_overwrites_existing_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let dts_path = dir.path().join("typed-env.d.ts");
    std::fs::write(&dts_path, "stale").unwrap();

    let env: EnvSnapshot = [("API_URL", "https://example.org"), ("APP_NAME", "svc")]
        .into_iter()
        .collect();
    let schema = load_schema(schema_path()).unwrap();
    TypedEnvPlugin::setup(PluginOptions::new(schema).dts(&dts_path), &env).unwrap();

    let written = std::fs::read_to_string(&dts_path).unwrap();
    assert!(written.starts_with("// Generated by typed-env. Do not edit.\n"));
}

#[test]
fn test_setup_fails_on_invalid_environment() {
    let dir = tempfile::tempdir().unwrap();
    let dts_path = dir.path().join("typed-env.d.ts");
    let env: EnvSnapshot = [("API_URL", "not a url"), ("APP_NAME", "svc")]
        .into_iter()
        .collect();
    let schema = load_schema(schema_path()).unwrap();

    let err = TypedEnvPlugin::setup(PluginOptions::new(schema).dts(&dts_path), &env).unwrap_err();
    match &err {
        PluginError::Generate(inner) => assert_eq!(inner.key(), "API_URL"),
        other => panic!("expected generation failure, got: {other}"),
    }
    // The declaration was written before validation and is not rolled back.
    assert!(dts_path.exists());
}

#[test]
fn test_setup_fails_when_declaration_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    let dts_path = dir.path().join("missing").join("typed-env.d.ts");
    let err = TypedEnvPlugin::setup(
        PluginOptions::new(typed_env_schema::Schema::new()).dts(&dts_path),
        &EnvSnapshot::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PluginError::WriteDeclaration { .. }));
}
