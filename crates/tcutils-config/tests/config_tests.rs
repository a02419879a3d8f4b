// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the tcutils configuration system.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tcutils_config::{
    load_and_validate, load_and_validate_str, yaml, ConfigError, ConfigSchema, Configuration,
};
use tcutils_fs::PosixPermissions;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Paths {
    #[serde(default)]
    data: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Logging {
    #[serde(default)]
    level: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceSchema {
    #[serde(default)]
    name: String,
    #[serde(default)]
    permissions: PosixPermissions,
    #[serde(default)]
    paths: Paths,
    #[serde(default)]
    logging: Logging,
}

impl ConfigSchema for ServiceSchema {}

/// The include fixture expands to the full nested mapping.
#[test]
fn yaml_include_expands_fixture() {
    let contents = yaml::load(data("base.yaml")).expect("fixture should load");
    let expected: Value = serde_yaml::from_str(
        r#"
base:
  somevar: test
  somelist: [one, two]
  included:
    other:
      foo: bar
"#,
    )
    .unwrap();
    assert_eq!(contents, expected);
}

/// Dotted access reaches into included documents.
#[test]
fn configuration_load_and_dotted_access() {
    let config = Configuration::load(data("base.yaml")).unwrap();
    assert_eq!(
        config.get("base.included.other.foo").unwrap(),
        &Value::from("bar")
    );
    assert_eq!(config.get("base.somevar").unwrap(), &Value::from("test"));
    assert!(config.item("base").is_some());
    assert!(matches!(
        config.get("base.included.missing"),
        Err(ConfigError::NoSuchAttribute { .. })
    ));
}

/// A schema with path and permission fields deserializes from YAML.
#[test]
fn schema_with_path_and_permission_fields() {
    let schema: ServiceSchema = load_and_validate(data("service.yaml"), None).unwrap();
    assert_eq!(schema.name, "inventory");
    assert_eq!(schema.permissions.to_octal(), 0o750);
    assert_eq!(schema.paths.data, PathBuf::from("/var/lib/inventory"));
    assert_eq!(schema.logging.level, "info");
}

/// Missing configuration files surface as a single not-found diagnostic.
#[test]
fn missing_file_is_a_diagnostic() {
    let errors = load_and_validate::<ServiceSchema>(data("absent.yaml"), None).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ConfigError::Path(_)));
}

/// Unknown keys in inline YAML are rejected with a suggestion.
#[test]
fn unknown_key_in_inline_yaml() {
    let errors = load_and_validate_str::<ServiceSchema>("nmae: x\n", None).unwrap_err();
    match &errors[0] {
        ConfigError::UnknownKey { key, suggestion, .. } => {
            assert_eq!(key, "nmae");
            assert_eq!(suggestion.as_deref(), Some("name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Malformed permissions are reported instead of defaulted.
#[test]
fn invalid_permissions_rejected() {
    let errors = load_and_validate_str::<ServiceSchema>("permissions: '9999'\n", None).unwrap_err();
    assert!(!errors.is_empty());
}
