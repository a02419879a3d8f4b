// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nested configuration mapping with dotted-path access.

use std::fmt::{self, Write as _};
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tcutils_fs::{NormalizeOptions, check_path};
use tracing::debug;

use crate::diagnostic::{ConfigError, YamlSource};
use crate::schema::{self, ConfigSchema};
use crate::yaml;

/// A loaded configuration document.
///
/// `get("a.b.c")` descends one mapping level per dot-separated segment.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    config: Mapping,
    source: Option<YamlSource>,
}

impl Configuration {
    /// Wrap an already-built mapping.
    pub fn new(config: Mapping) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// Wrap a parsed document. `null` (an empty file) is an empty mapping.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Mapping(config) => Ok(Self::new(config)),
            Value::Null => Ok(Self::default()),
            other => Err(ConfigError::Other(format!(
                "configuration root must be a mapping, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Load a YAML file, resolving `!include` directives.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = check_path(path, NormalizeOptions::default())?;
        let value = yaml::load(&path)?;
        let mut config = Self::from_value(value)?;
        // Kept for error spans; unreadable here means the span is skipped.
        if let Ok(content) = std::fs::read_to_string(&path) {
            config.source = Some(YamlSource {
                name: path.display().to_string(),
                content,
            });
        }
        debug!(path = %path.display(), keys = config.config.len(), "configuration loaded");
        Ok(config)
    }

    /// Parse YAML text. Includes resolve against the current directory.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let base = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: ".".into(),
            source,
        })?;
        let mut config = Self::from_value(yaml::load_str(content, &base)?)?;
        config.source = Some(YamlSource {
            name: "<inline>".to_string(),
            content: content.to_string(),
        });
        Ok(config)
    }

    /// Value at the dotted path `key`.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        lookup(&self.config, key)
    }

    /// Top-level item `key`, `None` when absent.
    pub fn item(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// A view over the nested mapping at `key`.
    pub fn section(&self, key: &str) -> Result<ConfigurationAttribute<'_>, ConfigError> {
        let value = self.get(key)?;
        Ok(ConfigurationAttribute {
            path: key.to_string(),
            value,
        })
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.config
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.config)
    }

    pub(crate) fn source(&self) -> Option<&YamlSource> {
        self.source.as_ref()
    }

    /// Validate against a schema type, with optional `PREFIX_` environment
    /// overrides (`PREFIX_SECTION__KEY=value`).
    pub fn extract<S: ConfigSchema>(&self, env_prefix: Option<&str>) -> Result<S, Vec<ConfigError>> {
        schema::extract(self, env_prefix)
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Configuration(")?;
        write_mapping(f, &self.config)?;
        f.write_char(')')
    }
}

/// Borrowed view of a nested configuration value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationAttribute<'a> {
    path: String,
    value: &'a Value,
}

impl<'a> ConfigurationAttribute<'a> {
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Value at the dotted path `key` relative to this attribute.
    pub fn get(&self, key: &str) -> Result<&'a Value, ConfigError> {
        match self.value {
            Value::Mapping(map) => lookup(map, key).map_err(|err| match err {
                ConfigError::NoSuchAttribute { segment, .. } => ConfigError::NoSuchAttribute {
                    key: format!("{}.{key}", self.path),
                    segment,
                },
                other => other,
            }),
            _ => Err(ConfigError::NoSuchAttribute {
                key: format!("{}.{key}", self.path),
                segment: first_segment(key).to_string(),
            }),
        }
    }

    pub fn item(&self, key: &str) -> Option<&'a Value> {
        self.value.as_mapping().and_then(|map| map.get(key))
    }
}

impl fmt::Display for ConfigurationAttribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.value)
    }
}

fn first_segment(key: &str) -> &str {
    key.split('.').next().unwrap_or(key)
}

fn lookup<'a>(root: &'a Mapping, key: &str) -> Result<&'a Value, ConfigError> {
    let missing = |segment: &str| ConfigError::NoSuchAttribute {
        key: key.to_string(),
        segment: segment.to_string(),
    };

    let mut segments = key.split('.');
    let first = segments.next().unwrap_or(key);
    let mut current = root.get(first).ok_or_else(|| missing(first))?;
    for segment in segments {
        current = current
            .as_mapping()
            .and_then(|map| map.get(segment))
            .ok_or_else(|| missing(segment))?;
    }
    Ok(current)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// Rendering follows the dict-literal style: 'quoted' strings, True/False,
// None.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("None"),
        Value::Bool(true) => f.write_str("True"),
        Value::Bool(false) => f.write_str("False"),
        Value::Number(n) => write!(f, "{n}"),
        Value::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
        Value::Sequence(items) => {
            f.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_char(']')
        }
        Value::Mapping(map) => write_mapping(f, map),
        Value::Tagged(tagged) => {
            write!(f, "{} ", tagged.tag)?;
            write_value(f, &tagged.value)
        }
    }
}

fn write_mapping(f: &mut fmt::Formatter<'_>, map: &Mapping) -> fmt::Result {
    f.write_char('{')?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_value(f, key)?;
        f.write_str(": ")?;
        write_value(f, value)?;
    }
    f.write_char('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMMY_CONFIG: &str = r#"
string: foo
number: 42
flag: false
nested:
  one: 1
  three: something
  inception:
    full: stars
    nice: 1
"#;

    fn dummy() -> Configuration {
        let value: Value = serde_yaml::from_str(DUMMY_CONFIG).unwrap();
        Configuration::from_value(value).unwrap()
    }

    #[test]
    fn dotted_item_access() {
        let config = dummy();
        let cases = [
            ("string", Value::from("foo")),
            ("number", Value::from(42)),
            ("nested.one", Value::from(1)),
            ("nested.inception.full", Value::from("stars")),
            ("nested.inception.nice", Value::from(1)),
        ];
        for (key, expected) in cases {
            assert_eq!(config.get(key).unwrap(), &expected, "key: {key}");
        }
    }

    #[test]
    fn missing_attribute_names_the_segment() {
        let config = dummy();
        let err = config.get("nested.inception.absent").unwrap_err();
        match err {
            ConfigError::NoSuchAttribute { key, segment } => {
                assert_eq!(key, "nested.inception.absent");
                assert_eq!(segment, "absent");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Descending through a scalar fails on the next segment.
        assert!(config.get("string.length").is_err());
    }

    #[test]
    fn item_access_returns_none_for_missing_keys() {
        let config = dummy();
        assert_eq!(config.item("flag"), Some(&Value::Bool(false)));
        assert_eq!(config.item("absent"), None);
        // Items are top-level only.
        assert_eq!(config.item("nested.one"), None);
    }

    #[test]
    fn sections_resolve_relative_keys() {
        let config = dummy();
        let nested = config.section("nested").unwrap();
        assert_eq!(nested.get("inception.full").unwrap(), &Value::from("stars"));
        assert_eq!(nested.item("three"), Some(&Value::from("something")));

        let err = nested.get("inception.absent").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NoSuchAttribute { ref key, .. } if key == "nested.inception.absent"
        ));
    }

    #[test]
    fn display_renders_dict_literal() {
        let value: Value =
            serde_yaml::from_str("string: foo\nnumber: 42\nflag: false\nlist: [a, ~]\n").unwrap();
        let config = Configuration::from_value(value).unwrap();
        assert_eq!(
            config.to_string(),
            "Configuration({'string': 'foo', 'number': 42, 'flag': False, 'list': ['a', None]})"
        );
    }

    #[test]
    fn root_must_be_a_mapping() {
        assert!(Configuration::from_value(Value::from("scalar")).is_err());
        assert_eq!(
            Configuration::from_value(Value::Null).unwrap(),
            Configuration::default()
        );
    }
}
